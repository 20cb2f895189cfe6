//! Theme error types.

use thiserror::Error;

/// Errors that can occur while reading tooltip styling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// Invalid color format.
    #[error("Invalid color format: {0}")]
    InvalidColor(String),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;
