use glam::Vec3;

use super::perspective::PerspectiveCamera;

/// User-driven orbit around the camera target: drag to rotate, wheel to zoom,
/// shift-drag to pan. Every input is ignored while disabled.
#[derive(Debug, Clone, Copy)]
pub struct OrbitControls {
    enabled: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 3.0,
            max_distance: 50.0,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.5,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Orbits the eye around the target. Angles in radians, scaled by `rotate_speed`.
    pub fn rotate(&self, camera: &mut PerspectiveCamera, delta_yaw: f32, delta_pitch: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let offset = camera.position - camera.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return false;
        }

        let yaw = offset.x.atan2(offset.z) + delta_yaw * self.rotate_speed;
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin() + delta_pitch * self.rotate_speed;
        let pitch = pitch.clamp(self.min_pitch, self.max_pitch);
        camera.position = calculate_cartesian_eye_position(pitch, yaw, distance, camera.target);
        true
    }

    /// Moves the eye along the view axis. Positive `delta` zooms out.
    pub fn zoom(&self, camera: &mut PerspectiveCamera, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let offset = camera.position - camera.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return false;
        }

        let scale = 0.95_f32.powf(-delta * self.zoom_speed);
        let new_distance = (distance * scale).clamp(self.min_distance, self.max_distance);
        camera.position = camera.target + offset / distance * new_distance;
        true
    }

    /// Shifts eye and target together in the view plane, scaled by distance
    /// so the feel is the same at every zoom level.
    pub fn pan(&self, camera: &mut PerspectiveCamera, dx: f32, dy: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let forward = camera.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        let pan_scale = camera.position.distance(camera.target) * 0.1 * self.pan_speed;
        let movement = (right * dx + up * dy) * pan_scale;
        camera.position += movement;
        camera.target += movement;
        true
    }
}

fn calculate_cartesian_eye_position(pitch: f32, yaw: f32, distance: f32, target: Vec3) -> Vec3 {
    Vec3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
