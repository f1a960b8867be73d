//! Error types for catalog construction.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating a draw catalog.
///
/// Draw-time operations never fail; every configuration problem is caught
/// here, when the catalog is built.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog declares no categories.
    #[error("catalog has no categories")]
    NoCategories,

    /// A category weight is zero, negative, or not finite.
    #[error("category \"{category}\" has invalid weight {weight}")]
    InvalidWeight {
        /// The offending category id.
        category: String,
        /// The rejected weight.
        weight: f64,
    },

    /// Two categories share an id.
    #[error("duplicate category: \"{0}\"")]
    DuplicateCategory(String),

    /// Two entries share an id.
    #[error("duplicate entry: \"{0}\"")]
    DuplicateEntry(String),

    /// An entry points at a category that does not exist.
    #[error("entry \"{entry}\" references unknown category \"{category}\"")]
    UnknownCategory {
        /// The entry id.
        entry: String,
        /// The missing category id.
        category: String,
    },

    /// A category has no entries to draw from.
    #[error("category \"{0}\" has no entries")]
    EmptyCategory(String),

    /// A catalog document could not be parsed.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}
