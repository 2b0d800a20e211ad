//! Label Manager Library
//!
//! State holder for a label-editing screen: loads the label catalog, tracks
//! which labels are applied to an item, and forwards create/delete/assign
//! requests to a remote data service. The CLI driver lives in `src/main.rs`.

pub mod color;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
/// Observable label state and the store that mutates it
pub mod state;

pub use color::Color;
pub use error::{ColorError, ServiceError, StoreError};
pub use models::{Item, Label, LabelId};
pub use service::LabelService;
pub use state::{LabelSelectionStore, LabelState};
