//! Pointer hit testing against the scene graph.

use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::math::{intersect_aabb, moller_trumbore_intersect, Ray};
use crate::scene::{SceneNode, MAX_TREE_DEPTH};

/// A click in viewport pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Nearest intersection of the pick ray with one surface.
#[derive(Debug, Clone)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
    pub node: SceneNode,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Raycaster {
    pointer: Vec2,
}

impl Raycaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the pointer in normalized device coordinates and returns it.
    pub fn set_pointer(&mut self, event: PointerEvent, width: u32, height: u32) -> Vec2 {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        self.pointer = Vec2::new(
            (event.client_x / width) * 2.0 - 1.0,
            -(event.client_y / height) * 2.0 + 1.0,
        );
        self.pointer
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn ray(&self, camera: &PerspectiveCamera) -> Ray {
        camera.ray_through(self.pointer)
    }

    /// Every visible surface under the pointer among `candidates` and their
    /// descendants, nearest first.
    pub fn intersect(&self, candidates: &[SceneNode], camera: &PerspectiveCamera) -> Vec<Hit> {
        intersect_ray(&self.ray(camera), candidates)
    }
}

/// Casts `ray` through each candidate subtree. Surfaces hidden directly or
/// through an ancestor are skipped. Exact distance ties keep traversal order.
pub fn intersect_ray(ray: &Ray, candidates: &[SceneNode]) -> Vec<Hit> {
    let mut hits = Vec::new();

    for candidate in candidates {
        candidate.traverse_world(&mut |node, world| {
            if !node.is_surface() || !node.is_effectively_visible() {
                return;
            }

            // Broad phase against the world-space box
            let bounds = node.with_geometry(|g| g.map(|g| g.local_bounds().transformed(world)));
            let Some(bounds) = bounds else { return };
            if bounds.is_empty() || intersect_aabb(ray.origin, ray.direction, bounds.min, bounds.max) < 0.0 {
                return;
            }

            let triangles = node.with_geometry(|g| g.map(|g| g.triangles()).unwrap_or_default());
            let nearest = triangles
                .iter()
                .filter_map(|[a, b, c]| {
                    moller_trumbore_intersect(
                        ray.origin,
                        ray.direction,
                        world.transform_point3(*a),
                        world.transform_point3(*b),
                        world.transform_point3(*c),
                    )
                })
                .map(|hit| hit.t)
                .fold(None, |best: Option<f32>, t| Some(best.map_or(t, |b| b.min(t))));

            if let Some(distance) = nearest {
                hits.push(Hit {
                    distance,
                    point: ray.point_at(distance),
                    node: node.clone(),
                });
            }
        });
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest node at or above `node` carrying a product tag.
pub fn find_product_ancestor(node: &SceneNode) -> Option<SceneNode> {
    let chain = node.ancestors_inclusive();
    let found = chain.into_iter().find(|n| n.tag().is_product());
    if found.is_none() {
        log::debug!(
            "No product at or above {:?} within {} levels",
            node.name(),
            MAX_TREE_DEPTH
        );
    }
    found
}
