mod aabb;
mod easing;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use easing::ease_in_out_quad;
pub use ray::{intersect_aabb, Ray};
pub use triangle::{moller_trumbore_intersect, TriangleIntersection};
