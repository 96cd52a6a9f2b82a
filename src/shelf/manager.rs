use std::collections::HashMap;

use super::classifier::{classify_model, ClassifiedProduct};
use super::product::{ProductLocation, ProductRecord};
use super::shelf::Shelf;
use crate::config::ShelfConfig;
use crate::error::SceneError;
use crate::math::AABB;
use crate::scene::{NodeKey, SceneNode};
use crate::traits::ModelLoader;

/// Registry of every shelf in the aisle, the surface → product reverse index,
/// and the current selection.
///
/// The reverse index and the per-shelf product maps are only ever written
/// together, in [`ShelfManager::install_shelf`] and [`ShelfManager::dispose`].
#[derive(Debug, Default)]
pub struct ShelfManager {
    shelves: Vec<Shelf>,
    shelf_index: HashMap<String, usize>,
    selectable: HashMap<NodeKey, ProductLocation>,
    selected: Option<ProductLocation>,
}

impl ShelfManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a shelf, awaits its model and classifies it.
    ///
    /// A malformed config is the only error. A failed load still registers the
    /// shelf, with no model and no products. The registry stays mutably
    /// borrowed until the load resolves; see [`ShelfManager::install_shelf`].
    pub async fn add_shelf(
        &mut self,
        config: &ShelfConfig,
        loader: &dyn ModelLoader,
    ) -> Result<&Shelf, SceneError> {
        self.check_config(config)?;
        log::info!("Loading shelf {} from {}", config.id, config.model_path);
        let model = loader.load(&config.model_path).await;
        self.install_shelf(config, model)
    }

    /// Registers a shelf from an already resolved load result.
    ///
    /// `add_shelf` borrows the registry for the whole load. Callers that need
    /// to keep rendering or querying while a model loads should await the
    /// loader themselves and hand the result in here.
    ///
    /// Every shelf needs its own model tree. A tree that is already attached
    /// somewhere, or whose surfaces are already registered, is refused and the
    /// shelf is registered empty, as for a failed load.
    pub fn install_shelf(
        &mut self,
        config: &ShelfConfig,
        model: anyhow::Result<SceneNode>,
    ) -> Result<&Shelf, SceneError> {
        self.check_config(config)?;
        let mut shelf = Shelf::new(config);

        match model.and_then(|model| self.check_unshared(model)) {
            Ok(model) => {
                for surface in model.surfaces() {
                    surface.set_shadows(true, true);
                }
                shelf.set_model(model.clone());
                for ClassifiedProduct { record, surface } in classify_model(&config.id, &model) {
                    self.selectable.insert(surface.key(), record.location());
                    shelf.register_product(record, surface);
                }
                log::info!(
                    "Shelf {} ready with {} products",
                    config.id,
                    shelf.product_count()
                );
            }
            Err(err) => {
                log::warn!(
                    "No usable model {} for shelf {}: {err:#}",
                    config.model_path,
                    config.id
                );
            }
        }

        let slot = self.shelves.len();
        self.shelf_index.insert(config.id.clone(), slot);
        self.shelves.push(shelf);
        Ok(&self.shelves[slot])
    }

    fn check_unshared(&self, model: SceneNode) -> anyhow::Result<SceneNode> {
        if let Some(parent) = model.parent() {
            anyhow::bail!(
                "model {:?} is already attached under {:?}",
                model.name(),
                parent.name()
            );
        }
        if model
            .surfaces()
            .iter()
            .any(|surface| self.selectable.contains_key(&surface.key()))
        {
            anyhow::bail!("model {:?} is already registered with another shelf", model.name());
        }
        Ok(model)
    }

    fn check_config(&self, config: &ShelfConfig) -> Result<(), SceneError> {
        config.validate()?;
        if self.shelf_index.contains_key(&config.id) {
            return Err(SceneError::DuplicateShelf(config.id.clone()));
        }
        Ok(())
    }

    /// Focuses one product: every other shelf is hidden and, within the target
    /// shelf, every other product surface. `None` if either id is unknown.
    pub fn select_product(&mut self, shelf_id: &str, mesh_id: &str) -> Option<ProductRecord> {
        let slot = *self.shelf_index.get(shelf_id)?;
        let record = self.shelves[slot].product(mesh_id)?.clone();

        for (i, shelf) in self.shelves.iter().enumerate() {
            if i == slot {
                shelf.show();
                shelf.show_only_product(mesh_id);
            } else {
                shelf.hide();
            }
        }
        self.selected = Some(record.location());
        log::info!("Selected {} ({})", record.product_name, record.mesh_id);
        Some(record)
    }

    /// Clears the selection and makes every shelf and product visible again.
    pub fn deselect_product(&mut self) {
        self.selected = None;
        for shelf in &self.shelves {
            shelf.show();
            shelf.show_all_products();
        }
    }

    pub fn selection(&self) -> Option<&ProductLocation> {
        self.selected.as_ref()
    }

    /// Registry entry for a surface.
    ///
    /// Falls back to the surface's product tag when the reverse index has no
    /// entry for it; that fallback means the index and the live surfaces have
    /// diverged, so it is logged.
    pub fn product_by_mesh(&self, surface: &SceneNode) -> Option<ProductLocation> {
        if let Some(location) = self.selectable.get(&surface.key()) {
            return Some(location.clone());
        }

        let tag = surface.tag();
        let tag = tag.as_product()?;
        let shelf = self.shelf(&tag.shelf_id)?;
        let record = shelf
            .products()
            .iter()
            .find(|record| record.product_name == tag.product_name)?;
        log::warn!(
            "Surface {:?} missing from the reverse index; recovered {} from its tag",
            surface.name(),
            record.mesh_id
        );
        Some(record.location())
    }

    pub fn product(&self, shelf_id: &str, mesh_id: &str) -> Option<&ProductRecord> {
        self.shelf(shelf_id)?.product(mesh_id)
    }

    pub fn shelf(&self, id: &str) -> Option<&Shelf> {
        self.shelf_index.get(id).map(|&slot| &self.shelves[slot])
    }

    /// Shelves in registration order.
    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn shelf_roots(&self) -> Vec<SceneNode> {
        self.shelves.iter().map(|shelf| shelf.root().clone()).collect()
    }

    pub fn selectable_surfaces(&self) -> Vec<SceneNode> {
        self.shelves
            .iter()
            .flat_map(|shelf| shelf.product_surfaces().map(|(_, surface)| surface.clone()))
            .collect()
    }

    pub fn product_count(&self) -> usize {
        self.selectable.len()
    }

    /// Union of every shelf's world bounds, hidden shelves included.
    pub fn aisle_bounding_box(&self) -> AABB {
        self.shelves
            .iter()
            .fold(AABB::EMPTY, |acc, shelf| acc.union(&shelf.root().world_bounds()))
    }

    /// Drops every shelf and clears the selection in the same step.
    pub fn dispose(&mut self) {
        self.selected = None;
        self.selectable.clear();
        for shelf in &mut self.shelves {
            shelf.dispose();
        }
        self.shelves.clear();
        self.shelf_index.clear();
    }
}
