use crate::camera::PerspectiveCamera;
use crate::scene::Scene;

/// Drawing backend. The session only ever hands it the scene and the live camera.
pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);

    fn resize(&mut self, width: u32, height: u32);

    fn dispose(&mut self);
}
