use super::framing::{frame_to_fit, FALLBACK_POSE};
use super::orbit::OrbitControls;
use super::perspective::{CameraPose, PerspectiveCamera};
use super::transition::{TransitionDriver, TransitionHandle};
use crate::config::SessionConfig;
use crate::math::AABB;
use crate::scene::SceneNode;

/// Owns the live camera, its orbit controls, the aisle overview pose and the
/// transition between poses.
///
/// Orbit controls are disabled for as long as a transition is in flight.
#[derive(Debug)]
pub struct CameraManager {
    camera: PerspectiveCamera,
    controls: OrbitControls,
    default_pose: CameraPose,
    transitions: TransitionDriver,
}

impl CameraManager {
    pub fn new(config: &SessionConfig, width: u32, height: u32) -> Self {
        let mut camera = PerspectiveCamera::from_config(config, width, height);
        camera.set_pose(FALLBACK_POSE);
        Self {
            camera,
            controls: OrbitControls::new(),
            default_pose: FALLBACK_POSE,
            transitions: TransitionDriver::new(),
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn default_pose(&self) -> CameraPose {
        self.default_pose
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn is_animating(&self) -> bool {
        self.transitions.is_active()
    }

    /// Eases the live pose to `target` over `duration` seconds.
    pub fn transition_to(&mut self, target: CameraPose, duration: f32) -> TransitionHandle {
        self.controls.set_enabled(false);
        let handle = self.transitions.start(self.camera.pose(), target, duration);
        log::debug!(
            "Camera transition {} to {:?} over {duration}s",
            handle.generation(),
            target
        );
        handle
    }

    /// Frames a single surface's world bounds.
    pub fn animate_to_product(
        &mut self,
        surface: &SceneNode,
        padding: f32,
        duration: f32,
    ) -> TransitionHandle {
        let pose = frame_to_fit(&surface.world_bounds(), &self.camera, padding);
        self.transition_to(pose, duration)
    }

    /// Frames the whole aisle, records it as the default pose and jumps there.
    pub fn set_default_aisle_view(&mut self, bounds: &AABB, padding: f32) -> CameraPose {
        let pose = frame_to_fit(bounds, &self.camera, padding);
        log::info!(
            "Aisle view at {:?} looking at {:?}",
            pose.position,
            pose.target
        );
        self.set_default_pose(pose);
        pose
    }

    pub fn set_default_pose(&mut self, pose: CameraPose) {
        self.default_pose = pose;
        self.camera.set_pose(pose);
    }

    /// Eases back to the default pose.
    pub fn reset_camera(&mut self, duration: f32) -> TransitionHandle {
        self.transition_to(self.default_pose, duration)
    }

    /// Advances the active transition, if any, by one frame.
    pub fn update(&mut self, delta: f32) {
        if let Some(step) = self.transitions.advance(delta) {
            self.camera.set_pose(step.pose);
            if step.finished {
                self.controls.set_enabled(true);
            }
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) -> bool {
        self.controls.rotate(&mut self.camera, delta_yaw, delta_pitch)
    }

    pub fn zoom(&mut self, delta: f32) -> bool {
        self.controls.zoom(&mut self.camera, delta)
    }

    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        self.controls.pan(&mut self.camera, dx, dy)
    }
}
