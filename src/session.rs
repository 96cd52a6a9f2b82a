use glam::Vec3;

use crate::camera::{CameraManager, CameraPose, TransitionHandle};
use crate::config::{SessionConfig, ShelfConfig};
use crate::error::SceneError;
use crate::floor::{floor_from_bounds, placeholder_floor, remove_stray_planes};
use crate::interaction::{InteractionMode, ModeController};
use crate::picking::{find_product_ancestor, PointerEvent, Raycaster};
use crate::scene::{Scene, SceneNode};
use crate::shelf::{ProductLocation, ProductRecord, ShelfManager};
use crate::traits::{ModelLoader, Presenter, Renderer};

/// Camera pose used when the aisle has no geometry to frame.
pub const EMPTY_AISLE_POSE: CameraPose = CameraPose::new(Vec3::new(0.0, 5.0, 15.0), Vec3::ZERO);

/// Share of the progress bar covered by shelf loading.
const SHELF_LOADING_SHARE: f32 = 80.0;
const CLEANUP_PROGRESS: f32 = 85.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Pointer input is not accepted right now (focus mode or camera moving)
    Ignored,
    /// Nothing selectable under the pointer
    Missed,
    Selected(ProductRecord),
}

/// One interactive aisle: scene, shelves, camera, picking and mode, wired to
/// an external renderer and presenter.
pub struct AisleSession<R: Renderer, P: Presenter> {
    config: SessionConfig,
    scene: Scene,
    shelves: ShelfManager,
    cameras: CameraManager,
    raycaster: Raycaster,
    modes: ModeController,
    renderer: R,
    presenter: P,
    width: u32,
    height: u32,
    floor: Option<SceneNode>,
    pending: Option<TransitionHandle>,
    disposed: bool,
}

impl<R: Renderer, P: Presenter> AisleSession<R, P> {
    /// An invalid `config` is replaced by the defaults.
    pub fn new(config: SessionConfig, renderer: R, presenter: P, width: u32, height: u32) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}, using default session settings");
                SessionConfig::default()
            }
        };
        let scene = Scene::new();
        scene.add(&placeholder_floor());
        let cameras = CameraManager::new(&config, width, height);

        Self {
            config,
            scene,
            shelves: ShelfManager::new(),
            cameras,
            raycaster: Raycaster::new(),
            modes: ModeController::new(),
            renderer,
            presenter,
            width,
            height,
            floor: None,
            pending: None,
            disposed: false,
        }
    }

    /// Loads every shelf in order, then replaces the placeholder ground with a
    /// synthesized floor and frames the aisle.
    ///
    /// Malformed shelf configs are skipped and returned; failed model loads are
    /// not errors.
    pub async fn setup(&mut self, configs: &[ShelfConfig], loader: &dyn ModelLoader) -> Vec<SceneError> {
        self.presenter.on_loading_progress(0.0);
        let mut rejected = Vec::new();

        for (i, config) in configs.iter().enumerate() {
            if let Err(err) = self.shelves.add_shelf(config, loader).await {
                log::warn!("Skipping shelf config {:?}: {err}", config.id);
                rejected.push(err);
            }
            let loaded = (i + 1) as f32 / configs.len() as f32;
            self.presenter
                .on_loading_progress((loaded * SHELF_LOADING_SHARE).min(99.0));
        }

        for root in self.shelves.shelf_roots() {
            root.set_visible(true);
            self.scene.add(&root);
        }
        log::info!("{} shelves in scene", self.shelves.shelves().len());

        self.presenter.on_loading_progress(CLEANUP_PROGRESS);
        remove_stray_planes(&self.scene);

        let bounds = self.shelves.aisle_bounding_box();
        if let Some(floor) = floor_from_bounds(&bounds, self.config.floor_padding) {
            self.scene.add(&floor);
            self.floor = Some(floor);
        }

        if bounds.is_empty() {
            log::warn!("Empty aisle bounds, using fixed camera pose");
            self.cameras.set_default_pose(EMPTY_AISLE_POSE);
        } else {
            self.cameras
                .set_default_aisle_view(&bounds, self.config.aisle_padding);
        }

        self.presenter.on_loading_progress(100.0);
        rejected
    }

    /// Picks the nearest product under the pointer and focuses it.
    pub fn on_click(&mut self, event: PointerEvent) -> ClickOutcome {
        if !self.modes.accepts_pointer() || self.is_transition_pending() {
            log::debug!("Click ignored in {:?} mode", self.modes.mode());
            return ClickOutcome::Ignored;
        }

        self.raycaster.set_pointer(event, self.width, self.height);
        let hits = self
            .raycaster
            .intersect(&self.shelves.shelf_roots(), self.cameras.camera());
        let Some(nearest) = hits.first() else {
            return ClickOutcome::Missed;
        };
        log::debug!(
            "Nearest hit {:?} at {:.3}",
            nearest.node.name(),
            nearest.distance
        );

        let Some(location) = find_product_ancestor(&nearest.node)
            .and_then(|node| self.shelves.product_by_mesh(&node))
        else {
            return ClickOutcome::Missed;
        };
        match self.focus(&location) {
            Some(record) => ClickOutcome::Selected(record),
            None => ClickOutcome::Missed,
        }
    }

    /// Selects a product directly, as a click on it would.
    pub fn focus(&mut self, location: &ProductLocation) -> Option<ProductRecord> {
        if !self.modes.accepts_pointer() || self.is_transition_pending() {
            return None;
        }
        let surface = self
            .shelves
            .shelf(&location.shelf_id)
            .and_then(|shelf| shelf.product_surface(&location.mesh_id))
            .cloned()?;
        let record = self
            .shelves
            .select_product(&location.shelf_id, &location.mesh_id)?;

        self.modes.select();
        self.presenter.on_selection_changed(Some(&record));
        self.pending = Some(self.cameras.animate_to_product(
            &surface,
            self.config.product_padding,
            self.config.transition_seconds,
        ));
        Some(record)
    }

    /// Leaves focus mode: clears the selection and eases back to the aisle view.
    pub fn back(&mut self) -> bool {
        if !self.modes.back() {
            return false;
        }
        self.shelves.deselect_product();
        self.presenter.on_selection_changed(None);
        self.pending = Some(self.cameras.reset_camera(self.config.transition_seconds));
        true
    }

    /// One frame: advance the camera, then draw.
    pub fn update(&mut self, delta: f32) {
        self.cameras.update(delta);
        if self.pending.as_mut().is_some_and(TransitionHandle::is_complete) {
            self.pending = None;
        }
        if !self.disposed {
            self.renderer.render(&self.scene, self.cameras.camera());
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.cameras.on_resize(width, height);
        self.renderer.resize(width, height);
    }

    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) -> bool {
        self.cameras.orbit(delta_yaw, delta_pitch)
    }

    pub fn zoom(&mut self, delta: f32) -> bool {
        self.cameras.zoom(delta)
    }

    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        self.cameras.pan(dx, dy)
    }

    pub fn is_transition_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle of the camera transition in flight, if any.
    pub fn transition(&self) -> Option<&TransitionHandle> {
        self.pending.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> InteractionMode {
        self.modes.mode()
    }

    pub fn selection(&self) -> Option<&ProductLocation> {
        self.shelves.selection()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn shelves(&self) -> &ShelfManager {
        &self.shelves
    }

    pub fn cameras(&self) -> &CameraManager {
        &self.cameras
    }

    pub fn floor(&self) -> Option<&SceneNode> {
        self.floor.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Releases the registry, the scene graph and the renderer. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.pending = None;
        self.shelves.dispose();
        self.scene.clear();
        self.floor = None;
        self.renderer.dispose();
        log::info!("Session disposed");
    }
}
