//! AEM Prep Error Types
//!
//! Centralized error handling for the library seams.

use thiserror::Error;

/// Central error type for AEM Prep
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Content error: {0}")]
    Content(String),

    #[error("Preference store error: {0}")]
    Preferences(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Result type alias for AEM Prep operations
pub type PrepResult<T> = Result<T, PrepError>;
