use glam::Vec3;

use super::perspective::{CameraPose, PerspectiveCamera};
use crate::math::AABB;

/// Pose used when there is nothing meaningful to frame.
pub const FALLBACK_POSE: CameraPose = CameraPose::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);

/// Camera height above the volume centre, as a fraction of its largest extent.
pub const ELEVATION_FACTOR: f32 = 0.6;

/// Pose that fits `bounds` in the camera's vertical field of view, looking at
/// its centre from slightly above and along +Z.
///
/// `padding` scales the fitted distance; 1.0 is a tight fit.
pub fn frame_to_fit(bounds: &AABB, camera: &PerspectiveCamera, padding: f32) -> CameraPose {
    let size = bounds.size();
    let max_dim = size.max_element();
    if max_dim <= 0.0 || !max_dim.is_finite() {
        log::debug!("Nothing to frame, using fallback pose");
        return FALLBACK_POSE;
    }

    let center = bounds.center();
    let distance = max_dim / (2.0 * (camera.fov_radians() / 2.0).tan()) * padding;
    let pose = CameraPose::new(
        center + Vec3::new(0.0, ELEVATION_FACTOR * max_dim, distance),
        center,
    );
    if !pose.position.is_finite() {
        return FALLBACK_POSE;
    }
    pose
}
