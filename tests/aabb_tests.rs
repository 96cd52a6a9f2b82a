use glam::{Mat4, Quat, Vec3};
use aisle_explorer::math::AABB;

#[cfg(test)]
mod aabb_tests {
    use super::*;

    #[test]
    fn test_union_of_overlapping_shelves() {
        let left = AABB::new(Vec3::new(-4.0, 0.0, -0.5), Vec3::new(-1.0, 2.0, 0.5));
        let right = AABB::new(Vec3::new(-2.0, 0.0, -0.5), Vec3::new(3.0, 2.5, 0.5));

        let union = left.union(&right);

        assert_eq!(union.min, Vec3::new(-4.0, 0.0, -0.5));
        assert_eq!(union.max, Vec3::new(3.0, 2.5, 0.5));
        assert_eq!(union.size(), Vec3::new(7.0, 2.5, 1.0));
    }

    #[test]
    fn test_union_with_contained_box() {
        let outer = AABB::new(Vec3::ZERO, Vec3::splat(10.0));
        let inner = AABB::new(Vec3::splat(2.0), Vec3::splat(8.0));

        assert_eq!(outer.union(&inner), outer, "Union should equal larger box");
    }

    #[test]
    fn test_fold_from_empty() {
        let boxes = [
            AABB::new(Vec3::new(5.0, 10.0, 15.0), Vec3::new(15.0, 20.0, 25.0)),
            AABB::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0)),
        ];
        let total = boxes.iter().fold(AABB::EMPTY, |acc, b| acc.union(b));

        assert_eq!(total.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(total.max, Vec3::new(15.0, 20.0, 25.0));
        assert_eq!(total.center(), Vec3::new(7.0, 10.0, 12.5));
    }

    #[test]
    fn test_empty_volume_has_zero_size() {
        let empty = AABB::default();

        assert!(empty.is_empty());
        assert_eq!(empty.size(), Vec3::ZERO);
        assert_eq!(empty.center(), Vec3::ZERO);
        assert!(empty.transformed(&Mat4::from_translation(Vec3::X)).is_empty());
    }

    #[test]
    fn test_flat_box_is_not_empty() {
        let flat = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0));

        assert!(!flat.is_empty());
        assert_eq!(flat.size().max_element(), 10.0);
    }

    #[test]
    fn test_rotated_box_grows() {
        let unit = AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let rotation = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));

        let rotated = unit.transformed(&rotation);
        let half_diagonal = 0.5 * std::f32::consts::SQRT_2;

        assert!((rotated.max.x - half_diagonal).abs() < 1e-5);
        assert!((rotated.max.z - half_diagonal).abs() < 1e-5);
        assert!((rotated.max.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_scaled_and_translated_box() {
        let unit = AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 1.0, 1.0),
            Quat::IDENTITY,
            Vec3::new(10.0, 0.5, 0.0),
        );

        let placed = unit.transformed(&matrix);

        assert_eq!(placed.min, Vec3::new(9.0, 0.0, -0.5));
        assert_eq!(placed.max, Vec3::new(11.0, 1.0, 0.5));
    }
}
