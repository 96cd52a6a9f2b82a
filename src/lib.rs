pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod floor;
pub mod headless;
pub mod interaction;
pub mod loaders;
pub mod math;
pub mod picking;
pub mod scene;
pub mod session;
pub mod shelf;
pub mod traits;

pub use camera::{CameraManager, CameraPose, PerspectiveCamera};
pub use config::{AisleConfig, SessionConfig, ShelfConfig};
pub use error::SceneError;
pub use session::{AisleSession, ClickOutcome};
pub use shelf::{ProductLocation, ProductRecord, ShelfManager};
