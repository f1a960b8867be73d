//! Error types for divinations.

use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while setting up or consulting a divination.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The ouija question was blank.
    #[error("ask the spirits a question first")]
    EmptyQuestion,

    /// The ouija question exceeded the length limit.
    #[error("question is too long (max {max} characters)")]
    QuestionTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// A catalog failed validation.
    #[error("{0}")]
    Catalog(#[from] nyx_core::CoreError),
}
