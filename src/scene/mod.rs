mod geometry;
mod graph;
mod node;
mod tag;

pub use geometry::{Geometry, MeshGeometry};
pub use graph::Scene;
pub use node::{NodeKey, SceneNode, Transform, MAX_TREE_DEPTH};
pub use tag::{ProductTag, TagData};
