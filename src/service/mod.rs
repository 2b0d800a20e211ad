//! Data service boundary
//!
//! The store talks to the remote label service only through [`LabelService`].
//! Each call completes exactly once with a payload or a [`ServiceError`].

pub mod http;
pub mod memory;

use crate::error::ServiceError;
use crate::models::{Label, LabelId};
use async_trait::async_trait;

pub use http::HttpLabelService;
pub use memory::InMemoryLabelService;

/// Remote operations the label screen depends on
#[async_trait]
pub trait LabelService: Send + Sync {
    /// Fetch the full label catalog
    async fn fetch_labels(&self) -> Result<Vec<Label>, ServiceError>;

    /// Create a label; `color_hex` may be empty
    async fn create_label(
        &self,
        name: &str,
        color_hex: &str,
        description: Option<&str>,
    ) -> Result<Label, ServiceError>;

    /// Delete a label by ID
    async fn delete_label(&self, label_id: &str) -> Result<(), ServiceError>;

    /// Replace an item's labels with `label_ids` (in order)
    ///
    /// Returns the labels the service actually applied.
    async fn update_item_labels(
        &self,
        item_id: &str,
        label_ids: &[LabelId],
    ) -> Result<Vec<Label>, ServiceError>;
}
