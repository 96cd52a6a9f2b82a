use glam::Vec3;
use aisle_explorer::camera::{frame_to_fit, CameraManager, CameraPose, PerspectiveCamera, FALLBACK_POSE};
use aisle_explorer::config::SessionConfig;
use aisle_explorer::math::AABB;
use aisle_explorer::scene::{Geometry, MeshGeometry, SceneNode};

const FRAME: f32 = 1.0 / 60.0;

fn cameras() -> CameraManager {
    CameraManager::new(&SessionConfig::default(), 1280, 720)
}

fn run_frames(cameras: &mut CameraManager, frames: usize) {
    for _ in 0..frames {
        cameras.update(FRAME);
    }
}

#[cfg(test)]
mod framing_tests {
    use super::*;

    #[test]
    fn test_cube_framing_distance() {
        let camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
        for s in [0.5_f32, 1.0, 3.0, 12.0] {
            let cube = AABB::new(Vec3::splat(-s / 2.0), Vec3::splat(s / 2.0));
            let pose = frame_to_fit(&cube, &camera, 1.0);

            let expected = s / (2.0 * 37.5_f32.to_radians().tan());
            assert_eq!(pose.target, Vec3::ZERO);
            assert!((pose.position.z - expected).abs() < 1e-4 * s.max(1.0));
            assert!((pose.position.y - 0.6 * s).abs() < 1e-4 * s.max(1.0));
        }
    }

    #[test]
    fn test_aspect_does_not_change_framing() {
        let bounds = AABB::new(Vec3::new(-6.0, 0.0, -1.0), Vec3::new(6.0, 2.0, 1.0));
        let wide = PerspectiveCamera::new(75.0, 3.0, 0.1, 1000.0);
        let tall = PerspectiveCamera::new(75.0, 0.5, 0.1, 1000.0);

        assert_eq!(frame_to_fit(&bounds, &wide, 1.3), frame_to_fit(&bounds, &tall, 1.3));
    }

    #[test]
    fn test_fallback_never_produces_nan() {
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let degenerate = [
            AABB::EMPTY,
            AABB::new(Vec3::splat(2.0), Vec3::splat(2.0)),
            AABB::new(Vec3::splat(f32::NAN), Vec3::splat(f32::NAN)),
        ];
        for bounds in degenerate {
            let pose = frame_to_fit(&bounds, &camera, 1.5);
            assert_eq!(pose, FALLBACK_POSE);
            assert!(pose.position.is_finite() && pose.target.is_finite());
        }
    }
}

#[cfg(test)]
mod transition_tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_terminal_snap_is_exact() {
        let mut cameras = cameras();
        let target = CameraPose::new(Vec3::new(1.1, 2.2, 3.3), Vec3::new(0.1, 0.2, 0.3));

        let mut handle = cameras.transition_to(target, 1.5);
        run_frames(&mut cameras, 89);
        assert!(!handle.is_complete());
        assert_ne!(cameras.pose(), target);

        run_frames(&mut cameras, 5);
        assert!(handle.is_complete());
        assert_eq!(cameras.pose(), target);
        assert!(handle.now_or_never().is_some());
    }

    #[test]
    fn test_midway_pose_is_eased() {
        let mut cameras = cameras();
        let start = cameras.pose();
        let target = CameraPose::new(start.position + Vec3::new(10.0, 0.0, 0.0), start.target);

        cameras.transition_to(target, 1.0);
        cameras.update(0.5);

        // ease_in_out_quad(0.5) = 0.5
        assert!((cameras.pose().position.x - (start.position.x + 5.0)).abs() < 1e-4);

        cameras.update(0.25);
        // ease_in_out_quad(0.75) = 0.875
        assert!((cameras.pose().position.x - (start.position.x + 8.75)).abs() < 1e-4);
    }

    #[test]
    fn test_second_transition_starts_from_live_pose() {
        let mut cameras = cameras();
        let start = cameras.pose();
        let first_target = CameraPose::new(Vec3::new(20.0, 5.0, 10.0), Vec3::ZERO);
        let second_target = CameraPose::new(Vec3::new(-20.0, 5.0, 10.0), Vec3::ZERO);

        let mut first = cameras.transition_to(first_target, 1.0);
        cameras.update(0.5);
        let mid = cameras.pose();
        assert!(mid.position.x > start.position.x);

        let mut second = cameras.transition_to(second_target, 1.0);
        assert!(first.is_superseded());
        // First frame of the new transition barely moves away from the mid pose
        cameras.update(0.01);
        assert!((cameras.pose().position - mid.position).length() < 0.1);

        run_frames(&mut cameras, 70);
        assert!(second.is_complete());
        assert!(!first.is_complete());
        assert_eq!(cameras.pose(), second_target);
        assert!(cameras.controls().is_enabled());
    }

    #[test]
    fn test_product_focus_then_reset() {
        let mut cameras = cameras();
        let aisle = AABB::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::new(5.0, 3.0, 1.0));
        let overview = cameras.set_default_aisle_view(&aisle, 1.3);

        let product = SceneNode::surface("Tea Tin", Geometry::Mesh(MeshGeometry::cuboid(Vec3::splat(0.3))));
        product.set_position(Vec3::new(2.0, 1.2, 0.0));
        let expected = frame_to_fit(&product.world_bounds(), cameras.camera(), 1.5);

        cameras.animate_to_product(&product, 1.5, 1.5);
        run_frames(&mut cameras, 100);
        assert_eq!(cameras.pose(), expected);

        let mut back = cameras.reset_camera(1.5);
        run_frames(&mut cameras, 100);
        assert!(back.is_complete());
        assert_eq!(cameras.pose(), overview);
        assert_eq!(cameras.default_pose(), overview);
    }

    #[test]
    fn test_orbit_blocked_only_while_animating() {
        let mut cameras = cameras();
        assert!(cameras.orbit(0.2, 0.0));

        cameras.transition_to(FALLBACK_POSE, 0.5);
        assert!(!cameras.orbit(0.2, 0.0));
        assert!(!cameras.zoom(1.0));

        run_frames(&mut cameras, 40);
        assert!(cameras.orbit(0.2, 0.0));
        assert!(cameras.pan(0.1, 0.1));
    }
}
