//! Error types for the label store and its data service
//!
//! The store never inspects these: failures are logged and handed back to the
//! caller, and state is left as the completion rules dictate.

use thiserror::Error;

/// Errors reported by a [`crate::service::LabelService`]
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Transport-level failure (connection refused, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured base URL could not be turned into an endpoint
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Service answered with a non-success status
    #[error("Data service returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Failed to decode data service response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Label with the given ID does not exist
    #[error("Label not found: {0}")]
    LabelNotFound(String),

    /// Item with the given ID does not exist
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Request was rejected as malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Service cannot handle requests right now
    #[error("Data service unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`crate::state::LabelSelectionStore`] operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The data service request failed
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The store was closed before or while the request ran
    #[error("Label store has been closed")]
    Closed,
}

/// Errors produced while parsing colors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input was not `#RRGGBB` / `RRGGBB`
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}
