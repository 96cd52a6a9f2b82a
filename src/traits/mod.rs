pub mod loader;
pub mod presenter;
pub mod renderer;

pub use loader::*;
pub use presenter::*;
pub use renderer::*;
