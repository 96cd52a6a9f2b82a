use serde::Serialize;

use crate::scene::ProductTag;

/// Identity and description of one selectable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_id: String,
    pub product_name: String,
    pub description: String,
    pub shelf_id: String,
    pub mesh_id: String,
}

impl ProductRecord {
    pub fn location(&self) -> ProductLocation {
        ProductLocation::new(&self.shelf_id, &self.mesh_id)
    }

    /// The tag stamped onto the product's surface.
    pub fn tag(&self) -> ProductTag {
        ProductTag {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            description: self.description.clone(),
            shelf_id: self.shelf_id.clone(),
        }
    }
}

/// Where a product lives in the registry. Also the shape of the selection state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLocation {
    pub shelf_id: String,
    pub mesh_id: String,
}

impl ProductLocation {
    pub fn new(shelf_id: impl Into<String>, mesh_id: impl Into<String>) -> Self {
        Self {
            shelf_id: shelf_id.into(),
            mesh_id: mesh_id.into(),
        }
    }
}
