pub mod classifier;
mod manager;
mod product;
mod shelf;

pub use classifier::{classify_model, classify_name, product_slug, ClassifiedProduct, Verdict};
pub use manager::ShelfManager;
pub use product::{ProductLocation, ProductRecord};
pub use shelf::Shelf;
