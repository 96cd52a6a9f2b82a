//! Name-based split of a loaded model into selectable products and scenery.
//!
//! Only surface names are consulted: no size, height or material filtering.
//! Rejected surfaces stay in the scene but never become selectable.

use super::product::ProductRecord;
use crate::scene::{SceneNode, TagData};

/// Lower-case substrings that mark a surface as shelf structure.
pub const STRUCTURAL_KEYWORDS: [&str; 4] = ["frame", "rack", "support", "shelf"];

/// Trimmed names at or below this many characters are rejected.
pub const MAX_REJECTED_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Product,
    Unnamed,
    TooShort,
    Structural(&'static str),
}

pub fn classify_name(name: &str) -> Verdict {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Verdict::Unnamed;
    }
    if trimmed.chars().count() <= MAX_REJECTED_NAME_CHARS {
        return Verdict::TooShort;
    }
    let lower = trimmed.to_lowercase();
    match STRUCTURAL_KEYWORDS.iter().copied().find(|kw| lower.contains(*kw)) {
        Some(keyword) => Verdict::Structural(keyword),
        None => Verdict::Product,
    }
}

/// Lower-cases, joins whitespace runs with `_` and drops anything outside `[a-z0-9_]`.
pub fn product_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

pub fn mesh_id(shelf_id: &str, ordinal: usize) -> String {
    format!("{shelf_id}_product_{ordinal}")
}

/// A product surface together with the record derived from it.
#[derive(Debug, Clone)]
pub struct ClassifiedProduct {
    pub record: ProductRecord,
    pub surface: SceneNode,
}

/// Walks `model` depth-first (pre-order), tags every product surface and
/// returns the products in traversal order with ordinals starting at 0.
///
/// Deterministic for a given tree: running it again re-derives identical records.
pub fn classify_model(shelf_id: &str, model: &SceneNode) -> Vec<ClassifiedProduct> {
    let mut products = Vec::new();
    let mut surface_count = 0usize;

    model.traverse(&mut |node| {
        if !node.is_surface() {
            return;
        }
        surface_count += 1;

        let raw_name = node.name();
        match classify_name(&raw_name) {
            Verdict::Product => {}
            verdict => {
                log::debug!("[{shelf_id}] skipping surface {raw_name:?}: {verdict:?}");
                return;
            }
        }

        let name = raw_name.trim().to_string();
        let record = ProductRecord {
            product_id: product_slug(&name),
            description: format!("{name} product"),
            product_name: name,
            shelf_id: shelf_id.to_string(),
            mesh_id: mesh_id(shelf_id, products.len()),
        };
        node.set_tag(TagData::Product(record.tag()));
        log::debug!("[{shelf_id}] registered {} as {:?}", record.mesh_id, record.product_name);

        products.push(ClassifiedProduct {
            record,
            surface: node.clone(),
        });
    });

    log::info!(
        "Shelf {shelf_id}: {} of {surface_count} surfaces classified as products",
        products.len()
    );
    products
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_name_rules() {
        assert_eq!(classify_name(""), Verdict::Unnamed);
        assert_eq!(classify_name("   "), Verdict::Unnamed);
        assert_eq!(classify_name("x"), Verdict::TooShort);
        assert_eq!(classify_name(" ab "), Verdict::TooShort);
        assert_eq!(classify_name("abc"), Verdict::Product);
        assert_eq!(classify_name("Frame_Left"), Verdict::Structural("frame"));
        assert_eq!(classify_name("TopSHELF"), Verdict::Structural("shelf"));
        assert_eq!(classify_name("wire rack 2"), Verdict::Structural("rack"));
        assert_eq!(classify_name("Supports"), Verdict::Structural("support"));
        assert_eq!(classify_name("Soap Bar"), Verdict::Product);
    }

    #[test]
    fn test_keyword_match_is_substring() {
        // "cracker" contains "rack"
        assert_eq!(classify_name("Cracker Box"), Verdict::Structural("rack"));
    }

    #[test]
    fn test_product_slug() {
        assert_eq!(product_slug("Soap Bar"), "soap_bar");
        assert_eq!(product_slug("Cereal  Box\t(XL)"), "cereal_box_xl");
        assert_eq!(product_slug("Café-Crème 250g"), "cafcrme_250g");
        assert_eq!(product_slug("  padded  "), "padded");
    }

    #[test]
    fn test_mesh_id_format() {
        assert_eq!(mesh_id("shelf1", 0), "shelf1_product_0");
        assert_eq!(mesh_id("shelf-a", 12), "shelf-a_product_12");
    }
}
