//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::time::Duration;

/// Default data service endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Data service configuration
    pub service: ServiceConfig,
}

/// Data service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL the label endpoints hang off
    pub base_url: String,
    /// Bearer token sent with every request, if set
    pub api_token: Option<String>,
    /// Per-request timeout (in seconds)
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();
        Self {
            service: ServiceConfig {
                base_url: env::var("LABELS_API_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or(defaults.base_url),
                api_token: env::var("LABELS_API_TOKEN")
                    .ok()
                    .filter(|token| !token.is_empty()),
                request_timeout_secs: env::var("LABELS_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(defaults.request_timeout_secs),
            },
        }
    }
}
