//! Error handling for the Hatchery Dashboard

use thiserror::Error;

/// Dashboard error types
#[derive(Error, Debug)]
pub enum DashboardError {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    // Client-side refusals
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} is committed and cannot be modified")]
    ReadOnly(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl DashboardError {
    /// Backend answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::Api { status: 404, .. })
    }
}

impl From<validator::ValidationErrors> for DashboardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DashboardError::Validation(errors.to_string())
    }
}

impl From<&'static str> for DashboardError {
    fn from(message: &'static str) -> Self {
        DashboardError::Validation(message.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
