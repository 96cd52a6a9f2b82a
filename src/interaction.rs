use serde::Serialize;

/// What pointer input currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InteractionMode {
    /// Clicks pick products
    #[default]
    Select,
    /// A product is framed; clicks are ignored until `back`
    Focus,
}

/// SELECT / FOCUS state machine. Invalid transitions are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModeController {
    mode: InteractionMode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn accepts_pointer(&self) -> bool {
        self.mode == InteractionMode::Select
    }

    /// SELECT → FOCUS. Returns whether the mode changed.
    pub fn select(&mut self) -> bool {
        self.transition(InteractionMode::Select, InteractionMode::Focus)
    }

    /// FOCUS → SELECT. Returns whether the mode changed.
    pub fn back(&mut self) -> bool {
        self.transition(InteractionMode::Focus, InteractionMode::Select)
    }

    fn transition(&mut self, from: InteractionMode, to: InteractionMode) -> bool {
        if self.mode != from {
            log::debug!("Ignoring {:?} -> {:?} while in {:?}", from, to, self.mode);
            return false;
        }
        self.mode = to;
        log::info!("Mode changed to {:?}", to);
        true
    }
}
