//! Error types for the panel.

use thiserror::Error;

/// Result type for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;

/// Errors that can occur while running the panel.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The settings store could not be read or written.
    #[error("settings store unavailable: {0}")]
    Store(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted settings could not be encoded or decoded.
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),

    /// A divination could not be set up.
    #[error("{0}")]
    Oracle(#[from] nyx_oracle::OracleError),
}
