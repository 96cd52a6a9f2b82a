use glam::Vec3;
use std::collections::HashMap;

use super::product::ProductRecord;
use crate::config::ShelfConfig;
use crate::scene::{SceneNode, Transform};

/// A placed unit of the aisle: owns its root node, the loaded model under it,
/// and the products classified from that model.
#[derive(Debug)]
pub struct Shelf {
    id: String,
    position: Vec3,
    rotation: Vec3,
    model_path: String,
    root: SceneNode,
    model: Option<SceneNode>,
    /// Records in classification order.
    products: Vec<ProductRecord>,
    product_index: HashMap<String, usize>,
    product_surfaces: HashMap<String, SceneNode>,
}

impl Shelf {
    pub fn new(config: &ShelfConfig) -> Self {
        let root = SceneNode::group(config.id.clone());
        root.set_transform(Transform::from_position_euler(
            config.position(),
            config.rotation(),
        ));
        Self {
            id: config.id.clone(),
            position: config.position(),
            rotation: config.rotation(),
            model_path: config.model_path.clone(),
            root,
            model: None,
            products: Vec::new(),
            product_index: HashMap::new(),
            product_surfaces: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn model(&self) -> Option<&SceneNode> {
        self.model.as_ref()
    }

    /// Installs `model` under the shelf root, replacing any previous model.
    /// Every node of the new model starts out visible.
    pub fn set_model(&mut self, model: SceneNode) {
        if let Some(previous) = self.model.take() {
            self.root.remove_child(&previous);
        }
        model.traverse(&mut |node| node.set_visible(true));
        self.root.add_child(&model);
        self.model = Some(model);
    }

    pub(crate) fn register_product(&mut self, record: ProductRecord, surface: SceneNode) {
        let mesh_id = record.mesh_id.clone();
        match self.product_index.get(&mesh_id) {
            Some(&slot) => self.products[slot] = record,
            None => {
                self.product_index.insert(mesh_id.clone(), self.products.len());
                self.products.push(record);
            }
        }
        self.product_surfaces.insert(mesh_id, surface);
    }

    pub fn product(&self, mesh_id: &str) -> Option<&ProductRecord> {
        self.product_index
            .get(mesh_id)
            .and_then(|&slot| self.products.get(slot))
    }

    pub fn product_surface(&self, mesh_id: &str) -> Option<&SceneNode> {
        self.product_surfaces.get(mesh_id)
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Product surfaces in classification order.
    pub fn product_surfaces(&self) -> impl Iterator<Item = (&ProductRecord, &SceneNode)> + '_ {
        self.products.iter().filter_map(move |record| {
            self.product_surfaces
                .get(&record.mesh_id)
                .map(|surface| (record, surface))
        })
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn show(&self) {
        self.root.set_visible(true);
    }

    pub fn hide(&self) {
        self.root.set_visible(false);
    }

    pub fn is_visible(&self) -> bool {
        self.root.is_visible()
    }

    /// Hides every product surface except `mesh_id`. Non-product surfaces are untouched.
    pub fn show_only_product(&self, mesh_id: &str) {
        for (id, surface) in &self.product_surfaces {
            surface.set_visible(id == mesh_id);
        }
    }

    pub fn show_all_products(&self) {
        for surface in self.product_surfaces.values() {
            surface.set_visible(true);
        }
    }

    /// Releases the model subtree and every derived record.
    pub fn dispose(&mut self) {
        self.root.clear_children();
        self.model = None;
        self.products.clear();
        self.product_index.clear();
        self.product_surfaces.clear();
    }
}
