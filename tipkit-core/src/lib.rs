#![warn(missing_docs)]

//! Core library for tipkit => See `tipkit` crate.
//!
//! Contains the placement engine that decides where a popover is drawn
//! and the visibility controller that decides when.

/// Contains the geometry types shared by the placement engine and the host.
pub mod geometry;

/// Contains the [LayoutDirection](direction::LayoutDirection) enum.
pub mod direction;

/// Contains the [GeometryProvider](host::GeometryProvider) trait implemented by the host
/// rendering layer.
pub mod host;

/// Contains the quadrant-based placement engine.
pub mod placement;

/// Contains asynchronous anchor measurement bookkeeping.
pub mod measure;

/// Contains the one-shot settle timer.
pub mod timer;

/// Contains the [VisibilityController](visibility::VisibilityController).
pub mod visibility;

/// Contains the update mode bitflag.
pub mod update;

/// Contains configuration error types.
pub mod error;

pub use error::{ConfigError, ConfigResult};
pub use update::Update;
