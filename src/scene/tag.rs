/// Annotation attached to a scene node by classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagData {
    #[default]
    Untagged,
    Product(ProductTag),
}

/// Identity carried by a surface that was classified as a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTag {
    pub product_id: String,
    pub product_name: String,
    pub description: String,
    pub shelf_id: String,
}

impl TagData {
    pub fn is_product(&self) -> bool {
        matches!(self, TagData::Product(_))
    }

    pub fn as_product(&self) -> Option<&ProductTag> {
        match self {
            TagData::Product(tag) => Some(tag),
            TagData::Untagged => None,
        }
    }
}
