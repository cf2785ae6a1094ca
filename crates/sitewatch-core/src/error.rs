//! Error types for the sitewatch core components.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can surface from configuration, auth, or throttle state.
///
/// Probe failures are never errors; they become `SiteStatus` records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    State(#[from] sitewatch_state::StateError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}
