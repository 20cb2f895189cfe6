//! The boundary to the host rendering layer.
//!
//! The core never paints and never talks to a window system. Everything it
//! needs to know about the screen comes through [GeometryProvider].

use crate::direction::LayoutDirection;
use crate::geometry::ViewportSize;
use crate::measure::MeasureTicket;
use serde::Deserialize;
use std::rc::Rc;

/// Opaque handle of a rendered element, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Create a new element id with the given value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Platform families that differ in how their overlays report dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Fires its own dismiss event whenever a modal overlay goes away.
    Ios,
    /// Excludes the status bar from layout measurement.
    Android,
    /// Anything else.
    #[default]
    Other,
}

impl Platform {
    /// Whether the overlay's dismissal event already reports the close.
    pub fn overlay_dismiss_fires_close(&self) -> bool {
        matches!(self, Platform::Ios)
    }
}

/// Who tells the application that the popover closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseNotification {
    /// The controller invokes `on_close` itself when a trigger hides the popover.
    Explicit,
    /// The controller waits for the host's overlay-dismissed event, so the
    /// callback is not invoked twice.
    OverlayDismiss,
}

impl CloseNotification {
    /// The default policy for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        if platform.overlay_dismiss_fires_close() {
            CloseNotification::OverlayDismiss
        } else {
            CloseNotification::Explicit
        }
    }
}

/// Geometry and measurement services of the host rendering layer.
pub trait GeometryProvider {
    /// Synchronous snapshot of the current viewport size.
    fn viewport_size(&self) -> ViewportSize;

    /// Correction between layout and paint coordinates.
    ///
    /// Nonzero where a system status overlay is excluded from layout
    /// measurement but included when painting full-screen overlays.
    fn platform_vertical_offset(&self) -> f64 {
        0.0
    }

    /// Global text direction.
    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::Ltr
    }

    /// Measure the absolute on-screen rectangle of `element`.
    ///
    /// The host completes `ticket` whenever the measurement is available,
    /// usually on a later turn of its event loop. It may also never complete
    /// it, for example when the element was unmounted.
    fn measure_in_window(&self, element: ElementId, ticket: MeasureTicket);

    /// The platform family the host runs on.
    fn platform(&self) -> Platform {
        Platform::Other
    }
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for Rc<T> {
    fn viewport_size(&self) -> ViewportSize {
        (**self).viewport_size()
    }

    fn platform_vertical_offset(&self) -> f64 {
        (**self).platform_vertical_offset()
    }

    fn layout_direction(&self) -> LayoutDirection {
        (**self).layout_direction()
    }

    fn measure_in_window(&self, element: ElementId, ticket: MeasureTicket) {
        (**self).measure_in_window(element, ticket)
    }

    fn platform(&self) -> Platform {
        (**self).platform()
    }
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for &T {
    fn viewport_size(&self) -> ViewportSize {
        (**self).viewport_size()
    }

    fn platform_vertical_offset(&self) -> f64 {
        (**self).platform_vertical_offset()
    }

    fn layout_direction(&self) -> LayoutDirection {
        (**self).layout_direction()
    }

    fn measure_in_window(&self, element: ElementId, ticket: MeasureTicket) {
        (**self).measure_in_window(element, ticket)
    }

    fn platform(&self) -> Platform {
        (**self).platform()
    }
}
