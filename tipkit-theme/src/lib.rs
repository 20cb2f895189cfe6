#![warn(missing_docs)]

//! Styling for tipkit tooltips => See `tipkit` crate.
//!
//! Colors only affect painting; they never influence placement.

/// Contains the [TooltipStyle](style::TooltipStyle) struct.
pub mod style;

/// Contains hex color (de)serialization helpers for [vello::peniko::Color].
pub mod serde_color;

/// Contains theme error types.
pub mod error;

pub use error::{ThemeError, ThemeResult};
pub use style::TooltipStyle;
