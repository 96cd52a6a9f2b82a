use glam::{Mat4, Vec2, Vec3};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::math::Ray;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Right-handed, Y-up perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn from_config(config: &SessionConfig, width: u32, height: u32) -> Self {
        let mut camera = Self::new(config.fov_degrees, 1.0, config.near, config.far);
        camera.set_viewport(width, height);
        camera
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    /// Aspect from a viewport; a zero height is treated as one pixel.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (`x` right, `y` up, both in [-1, 1]).
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far_point - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        camera.set_pose(CameraPose::new(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 2.0, 0.0)));
        camera
    }

    #[test]
    fn test_center_ray_follows_view_direction() {
        let ray = camera().ray_through(Vec2::ZERO);
        assert_eq!(ray.origin, Vec3::new(0.0, 2.0, 10.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_corner_rays_diverge() {
        let cam = camera();
        let right = cam.ray_through(Vec2::new(1.0, 0.0));
        let up = cam.ray_through(Vec2::new(0.0, 1.0));
        assert!(right.direction.x > 0.0);
        assert!(up.direction.y > 0.0);

        // Vertical half-angle of the frustum equals fov / 2
        let half = up.direction.angle_between(Vec3::NEG_Z);
        assert!((half - 37.5_f32.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_guards_zero_height() {
        let mut cam = camera();
        cam.set_viewport(800, 0);
        assert_eq!(cam.aspect, 800.0);
        cam.set_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn test_pose_lerp() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::ZERO);
        let b = CameraPose::new(Vec3::new(2.0, 4.0, 6.0), Vec3::X);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mid.target, Vec3::new(0.5, 0.0, 0.0));
    }
}
