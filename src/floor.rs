//! Ground plane derived from the loaded content.

use glam::{Vec2, Vec3};

use crate::math::AABB;
use crate::scene::{Geometry, Scene, SceneNode, Transform};

/// Reserved name of the synthesized floor; cleanup never removes it.
pub const FLOOR_MARKER: &str = "dynamic-floor";

/// Gap between the floor and the lowest point of the content.
pub const FLOOR_OFFSET: f32 = 0.05;

pub const PLACEHOLDER_FLOOR_SIZE: f32 = 50.0;

/// Minimum |normal.y| for a plane to count as horizontal.
const HORIZONTAL_COS: f32 = 0.99;

/// Square horizontal plane sized from `reference`'s world bounds.
/// `None` when the reference has no geometry.
pub fn synthesize_floor(reference: &SceneNode, padding: f32) -> Option<SceneNode> {
    floor_from_bounds(&reference.world_bounds(), padding)
}

pub fn floor_from_bounds(bounds: &AABB, padding: f32) -> Option<SceneNode> {
    if bounds.is_empty() {
        log::warn!("No content bounds, skipping floor synthesis");
        return None;
    }

    let size = bounds.size();
    let side = size.x.max(size.z) * (1.0 + padding);
    let center = bounds.center();
    let y = bounds.min.y - FLOOR_OFFSET;

    let floor = horizontal_plane(FLOOR_MARKER, side, Vec3::new(center.x, y, center.z));
    log::info!("Floor {side:.2}x{side:.2} at y = {y:.2}");
    Some(floor)
}

/// Fixed ground shown while shelves are still loading.
pub fn placeholder_floor() -> SceneNode {
    horizontal_plane("floor", PLACEHOLDER_FLOOR_SIZE, Vec3::ZERO)
}

fn horizontal_plane(name: &str, side: f32, position: Vec3) -> SceneNode {
    let plane = SceneNode::surface(name, Geometry::plane(Vec2::splat(side)));
    plane.set_transform(Transform::from_position_euler(
        position,
        Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
    ));
    plane.set_shadows(false, true);
    plane
}

/// Plane surface whose world normal points along ±Y.
pub fn is_horizontal_plane(node: &SceneNode) -> bool {
    if !node.is_plane() {
        return false;
    }
    let normal = node.world_matrix().transform_vector3(Vec3::Z).normalize_or_zero();
    normal.y.abs() >= HORIZONTAL_COS
}

/// Detaches every horizontal plane not carrying [`FLOOR_MARKER`]. Returns how
/// many were removed.
pub fn remove_stray_planes(scene: &Scene) -> usize {
    let mut strays = Vec::new();
    scene.traverse(&mut |node| {
        if node.name() != FLOOR_MARKER && is_horizontal_plane(node) {
            strays.push(node.clone());
        }
    });

    for plane in &strays {
        log::debug!("Removing plane {:?}", plane.name());
        plane.detach();
    }
    if !strays.is_empty() {
        log::info!("Removed {} stray planes", strays.len());
    }
    strays.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshGeometry;

    #[test]
    fn test_floor_sized_from_bounds() {
        let bounds = AABB::new(Vec3::new(-2.0, 1.0, -1.0), Vec3::new(6.0, 3.0, 1.0));
        let floor = floor_from_bounds(&bounds, 0.3).unwrap();

        assert_eq!(floor.name(), FLOOR_MARKER);
        assert!(floor.receives_shadow());
        let world = floor.world_bounds();
        assert!((world.size().x - 10.4).abs() < 1e-4);
        assert!((world.size().z - 10.4).abs() < 1e-4);
        assert!((world.min.y - 0.95).abs() < 1e-5);
        assert!((world.center().x - 2.0).abs() < 1e-4);
        assert!(world.center().z.abs() < 1e-4);
    }

    #[test]
    fn test_floor_from_model() {
        let model = SceneNode::surface("crate", Geometry::Mesh(MeshGeometry::cuboid(Vec3::splat(2.0))));
        model.set_position(Vec3::new(0.0, 1.0, 0.0));
        let floor = synthesize_floor(&model, 0.0).unwrap();
        assert!((floor.transform().translation.y - -0.05).abs() < 1e-6);
        assert!(is_horizontal_plane(&floor));
    }

    #[test]
    fn test_empty_reference_has_no_floor() {
        assert!(synthesize_floor(&SceneNode::group("empty"), 0.3).is_none());
    }

    #[test]
    fn test_cleanup_keeps_marker_and_vertical_planes() {
        let scene = Scene::new();
        scene.add(&placeholder_floor());
        let wall = SceneNode::surface("backdrop", Geometry::plane(Vec2::splat(5.0)));
        scene.add(&wall);
        let floor = floor_from_bounds(&AABB::new(Vec3::ZERO, Vec3::ONE), 0.3).unwrap();
        scene.add(&floor);

        assert_eq!(remove_stray_planes(&scene), 1);
        assert!(scene.contains(&wall));
        assert!(scene.contains(&floor));
        assert_eq!(remove_stray_planes(&scene), 0);
    }
}
