// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render projection of a tooltip.
//!
//! These are plain descriptions of what to paint; the host turns them into
//! draw calls. Horizontal positions are expressed relative to the leading
//! edge so RTL hosts can apply them as right offsets.

use crate::config::ActionType;
use tipkit_core::direction::LayoutDirection;
use tipkit_core::placement::{VerticalOffset, POINTER_HALF_WIDTH, POINTER_HEIGHT};
use vello::kurbo::{Rect, Size};
use vello::peniko::Color;

/// Horizontal position of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalEdge {
    /// Distance from the viewport's left edge.
    Left(f64),
    /// Distance from the viewport's right edge.
    Right(f64),
}

impl HorizontalEdge {
    /// Apply `offset` to the leading edge of `direction`.
    pub fn leading(direction: LayoutDirection, offset: f64) -> Self {
        if direction.is_rtl() {
            HorizontalEdge::Right(offset)
        } else {
            HorizontalEdge::Left(offset)
        }
    }

    /// The physical left coordinate of an item of `width`.
    pub fn left(&self, width: f64, viewport_width: f64) -> f64 {
        match self {
            HorizontalEdge::Left(left) => *left,
            HorizontalEdge::Right(right) => viewport_width - right - width,
        }
    }
}

/// The trigger wrapper, always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerLayer {
    /// Gesture wired to the trigger.
    pub action_type: ActionType,
}

/// Full-screen dimming layer; pressing it dismisses the popover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayer {
    /// Covered area.
    pub bounds: Rect,
    /// Fill color.
    pub color: Color,
}

/// Copy of the trigger drawn above the overlay at the anchor's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightLayer {
    /// Horizontal position.
    pub horizontal: HorizontalEdge,
    /// Top edge.
    pub top: f64,
    /// Size of the anchor.
    pub size: Size,
    /// Background behind the trigger copy.
    pub color: Color,
}

/// Triangle pointing from the popover to the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLayer {
    /// Horizontal position.
    pub horizontal: HorizontalEdge,
    /// Top edge.
    pub top: f64,
    /// Triangle bounds.
    pub size: Size,
    /// Whether the tip points down (popover above the anchor).
    pub points_down: bool,
    /// Fill color.
    pub color: Color,
}

impl PointerLayer {
    /// Size of the pointer triangle.
    pub const SIZE: Size = Size::new(POINTER_HALF_WIDTH * 2.0, POINTER_HEIGHT);
}

/// The popover frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverLayer {
    /// Horizontal position.
    pub horizontal: HorizontalEdge,
    /// Vertical position.
    pub vertical: VerticalOffset,
    /// Resolved width.
    pub width: f64,
    /// Resolved height, [None] when sized by content. Percentages are
    /// resolved against the viewport height.
    pub height: Option<f64>,
    /// Background color.
    pub background_color: Color,
    /// Corner radius.
    pub corner_radius: f64,
    /// Inner padding.
    pub padding: f64,
}

impl PopoverLayer {
    /// Absolute frame of the popover. Needs a height: either a fixed one or
    /// the measured content height passed as `content_height`.
    pub fn frame(
        &self,
        viewport_width: f64,
        viewport_height: f64,
        content_height: Option<f64>,
    ) -> Option<Rect> {
        let height = self.height.or(content_height)?;
        let left = self.horizontal.left(self.width, viewport_width);
        let top = self.vertical.top(height, viewport_height);
        Some(Rect::new(left, top, left + self.width, top + height))
    }
}

/// Everything to paint for one tooltip, back to front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayers {
    /// The trigger wrapper.
    pub trigger: TriggerLayer,
    /// Dimming layer.
    pub overlay: Option<OverlayLayer>,
    /// Highlighted trigger copy.
    pub highlight: Option<HighlightLayer>,
    /// Pointer decoration.
    pub pointer: Option<PointerLayer>,
    /// Popover frame.
    pub popover: Option<PopoverLayer>,
}

impl TooltipLayers {
    /// Only the trigger wrapper.
    pub fn trigger_only(action_type: ActionType) -> Self {
        Self {
            trigger: TriggerLayer { action_type },
            overlay: None,
            highlight: None,
            pointer: None,
            popover: None,
        }
    }

    /// Whether the popover layer is present.
    pub fn has_popover(&self) -> bool {
        self.popover.is_some()
    }
}
