//! Stand-ins for the drawing backend and the UI, used by the CLI.

use crate::camera::PerspectiveCamera;
use crate::scene::Scene;
use crate::shelf::ProductRecord;
use crate::traits::{Presenter, Renderer};

/// Renderer that draws nothing and only counts what it was asked to do.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub viewport: (u32, u32),
    pub last_camera: Option<PerspectiveCamera>,
    pub disposed: bool,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Self::default()
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.frames += 1;
        self.last_camera = Some(*camera);
        log::trace!(
            "frame {} with {} top-level objects",
            self.frames,
            scene.root().child_count()
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Presenter that reports through the log and remembers the latest state.
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub progress: f32,
    pub selected: Option<ProductRecord>,
}

impl Presenter for LogPresenter {
    fn on_loading_progress(&mut self, percent: f32) {
        self.progress = percent;
        log::info!("Loading {percent:.0}%");
    }

    fn on_selection_changed(&mut self, product: Option<&ProductRecord>) {
        match product {
            Some(record) => log::info!(
                "Showing {} ({}) from {}",
                record.product_name,
                record.product_id,
                record.shelf_id
            ),
            None => log::info!("Selection cleared"),
        }
        self.selected = product.cloned();
    }
}
