//! Configuration errors.
//!
//! Geometry itself never fails: malformed input is rejected here, at
//! configuration time, so the placement arithmetic never sees `NaN`.

use thiserror::Error;

/// Errors that can occur while building or loading a tooltip configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension string could not be parsed.
    #[error("Invalid dimension '{0}': expected a length, a percentage like \"50%\" or \"auto\"")]
    InvalidDimension(String),

    /// A percentage string had a malformed or negative number.
    #[error("Invalid percentage '{0}'")]
    InvalidPercentage(String),

    /// A dimension resolved to a negative or non-finite value.
    #[error("Dimension `{name}` must be a finite, non-negative number, got {value}")]
    OutOfRange {
        /// The name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The configuration document could not be parsed.
    #[error("Failed to parse tooltip config: {0}")]
    Parse(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a parse error from anything printable.
    pub fn parse(details: impl ToString) -> Self {
        Self::Parse(details.to_string())
    }
}
