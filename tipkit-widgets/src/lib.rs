#![warn(missing_docs)]

//! Widget library for tipkit => See `tipkit` crate.
//!
//! Contains the [Tooltip](tooltip::Tooltip) widget and its configuration surface.

/// Contains the [TooltipConfig](config::TooltipConfig) configuration surface.
pub mod config;

/// Contains the render layer descriptions produced by a tooltip.
pub mod layers;

/// Contains the [Tooltip](tooltip::Tooltip) widget.
pub mod tooltip;

pub use config::{ActionType, Gesture, TooltipConfig};
pub use tooltip::Tooltip;
