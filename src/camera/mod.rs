mod framing;
mod manager;
mod orbit;
mod perspective;
mod transition;

pub use framing::{frame_to_fit, ELEVATION_FACTOR, FALLBACK_POSE};
pub use manager::CameraManager;
pub use orbit::OrbitControls;
pub use perspective::{CameraPose, PerspectiveCamera};
pub use transition::{TransitionDriver, TransitionHandle, TransitionStep};
