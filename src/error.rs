//! Error types for the highlight engine

use thiserror::Error;

/// Result type alias for highlight operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlight error types
///
/// None of these are fatal. The controller turns each of them into a
/// skipped region or a skipped trigger.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Selection is empty")]
    EmptySelection,

    #[error("Offset {offset} is outside the document ({len} characters)")]
    StaleOffset { offset: usize, len: usize },

    #[error("No active editor")]
    NoActiveEditor,

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
