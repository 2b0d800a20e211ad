// State management module
// Handles the label screen state and the store that drives it

/// Snapshot of the label screen and its pure transitions
pub mod label_state;
pub mod store;

pub use label_state::LabelState;
pub use store::LabelSelectionStore;
