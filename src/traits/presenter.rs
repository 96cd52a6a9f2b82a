use crate::shelf::ProductRecord;

/// Observer for UI-facing state changes.
pub trait Presenter {
    /// Loading progress in percent, 0 to 100
    fn on_loading_progress(&mut self, percent: f32);

    /// `None` when the selection is cleared
    fn on_selection_changed(&mut self, product: Option<&ProductRecord>);
}
