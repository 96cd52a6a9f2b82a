use glam::Vec3;

/// Result of a ray-triangle test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32, // Distance along ray
    pub u: f32,
    pub v: f32,
}

/// Möller-Trumbore ray-triangle intersection, double sided.
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Parallel to the triangle plane, or degenerate triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t < EPSILON {
        return None;
    }

    Some(TriangleIntersection { t, u, v })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_triangle() -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        )
    }

    #[test]
    fn test_direct_hit() {
        let (v0, v1, v2) = create_test_triangle();
        let hit = moller_trumbore_intersect(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), v0, v1, v2);
        let hit = hit.expect("ray through the centre should hit");
        assert!((hit.t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_back_face_hit() {
        let (v0, v1, v2) = create_test_triangle();
        let origin = Vec3::new(0.0, 0.0, -10.0);
        let hit = moller_trumbore_intersect(origin, Vec3::new(0.0, 0.0, 1.0), v0, v1, v2);
        assert!(hit.is_some());
    }

    #[test]
    fn test_miss() {
        let (v0, v1, v2) = create_test_triangle();
        let hit = moller_trumbore_intersect(
            Vec3::new(5.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            v0,
            v1,
            v2,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_behind_ray() {
        let (v0, v1, v2) = create_test_triangle();
        let hit = moller_trumbore_intersect(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), v0, v1, v2);
        assert!(hit.is_none());
    }

    #[test]
    fn test_edge_case_parallel_ray() {
        let (v0, v1, v2) = create_test_triangle();
        let hit = moller_trumbore_intersect(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(1.0, 0.0, 0.0),
            v0,
            v1,
            v2,
        );
        assert!(hit.is_none());
    }
}
