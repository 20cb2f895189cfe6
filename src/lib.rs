#![warn(missing_docs)]

//! Touch-friendly tooltip overlays with automatic placement.
//!
//! A tooltip wraps a trigger element. When the trigger fires, the popover
//! opens toward the side of the screen with the most room.

pub use nalgebra as math;
pub use vello::peniko as color;

pub use tipkit_core as core;
pub use tipkit_theme as theme;
pub use tipkit_widgets as widgets;

/// A "prelude" for users of tipkit.
///
/// ```rust
/// use tipkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::direction::LayoutDirection;
    pub use crate::core::geometry::{AnchorRect, Dimension, PopoverSize, ViewportSize};
    pub use crate::core::host::{CloseNotification, ElementId, GeometryProvider, Platform};
    pub use crate::core::measure::MeasureTicket;
    pub use crate::core::placement::{
        compute_placement, PlacementRequest, PlacementResult, Quadrant, VerticalOffset,
    };
    pub use crate::core::visibility::{TooltipCallbacks, VisibilityMode};
    pub use crate::core::{ConfigError, Update};

    pub use crate::theme::TooltipStyle;

    pub use crate::widgets::layers::{HorizontalEdge, TooltipLayers};
    pub use crate::widgets::{ActionType, Gesture, Tooltip, TooltipConfig};
}
