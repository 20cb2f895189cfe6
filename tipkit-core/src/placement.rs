// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quadrant-based popover placement.
//!
//! The anchor's center splits the viewport into four quadrants. Each one is
//! scored by the product of the distances from the center to its two
//! bounding screen edges, and the popover opens toward the largest.
//! This is an approximation of free space, not a polygon clip; the scores,
//! the tie-break order and the displacement constants below are relied on
//! for pixel-stable layouts and must not be "improved".

use crate::direction::LayoutDirection;
use crate::geometry::{AnchorRect, PopoverSize, ViewportSize};
use nalgebra::{Point2, Vector2};

/// Horizontal gap between anchor center and popover when a pointer is drawn.
pub const POINTER_CLEARANCE_X: f64 = 18.0;

/// Extra vertical gap between anchor and popover when a pointer is drawn.
pub const POINTER_CLEARANCE_Y: f64 = 10.0;

/// Distance kept from the viewport edge when the popover has to be pulled back on screen.
pub const SCREEN_MARGIN: f64 = 10.0;

/// Horizontal nudge used without a pointer, so the popover never sits exactly on the center line.
pub const HORIZONTAL_EPSILON: f64 = 0.001;

/// Distance from the anchor's top edge to the pointer's top edge when the popover is above.
pub const POINTER_ABOVE_OFFSET: f64 = 13.0;

/// How far the pointer overlaps the anchor's bottom edge when the popover is below.
pub const POINTER_BELOW_OVERLAP: f64 = 2.0;

/// Half the pointer's base width.
pub const POINTER_HALF_WIDTH: f64 = 7.5;

/// Height of the pointer triangle.
pub const POINTER_HEIGHT: f64 = POINTER_ABOVE_OFFSET + POINTER_BELOW_OVERLAP;

/// A region of the viewport relative to the anchor's center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Above and to the left.
    TopLeft,
    /// Above and to the right.
    TopRight,
    /// Below and to the right.
    BottomRight,
    /// Below and to the left.
    BottomLeft,
}

impl Quadrant {
    /// All quadrants in tie-break priority order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
        Quadrant::BottomLeft,
    ];

    /// `-1` for left quadrants, `1` for right ones.
    pub fn horizontal_sign(&self) -> f64 {
        if self.extends_left() {
            -1.0
        } else {
            1.0
        }
    }

    /// `-1` for top quadrants, `1` for bottom ones.
    pub fn vertical_sign(&self) -> f64 {
        if self.is_top() {
            -1.0
        } else {
            1.0
        }
    }

    /// Whether the popover grows leftward from the anchor.
    pub fn extends_left(&self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft)
    }

    /// Whether the quadrant lies above the anchor's center.
    pub fn is_top(&self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }

    fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.horizontal_sign(), self.vertical_sign())
    }
}

/// Vertical position of the popover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalOffset {
    /// Distance of the popover's top edge from the viewport top.
    Top(f64),
    /// Distance of the popover's bottom edge from the viewport bottom.
    ///
    /// Used when the popover has an intrinsic height and hangs above the
    /// anchor, so its bottom is the only edge known in advance.
    Bottom(f64),
}

impl VerticalOffset {
    /// Resolve to the popover's top edge given its height.
    pub fn top(&self, popover_height: f64, viewport_height: f64) -> f64 {
        match self {
            VerticalOffset::Top(top) => *top,
            VerticalOffset::Bottom(bottom) => viewport_height - bottom - popover_height,
        }
    }
}

/// Where to draw the popover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Horizontal offset from the leading edge (left in LTR, right in RTL).
    pub x: f64,
    /// Vertical position.
    pub y: VerticalOffset,
    /// True when the anchor's top edge lies below the reference point, that
    /// is when the popover is drawn above the anchor. Orients the pointer.
    pub placed_below_midline: bool,
    /// The quadrant the popover opens toward.
    pub quadrant: Quadrant,
    /// The direction `x` is measured in.
    pub direction: LayoutDirection,
}

impl PlacementResult {
    /// The physical left coordinate of the popover, mirrored under RTL.
    pub fn left_edge(&self, viewport_width: f64, popover_width: f64) -> f64 {
        self.direction
            .mirror_position(self.x, popover_width, viewport_width)
    }
}

/// All inputs of a placement computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// The trigger element's latest known geometry.
    pub anchor: AnchorRect,
    /// The popover's requested size.
    pub popover: PopoverSize,
    /// The viewport snapshot.
    pub viewport: ViewportSize,
    /// Whether a pointer decoration is drawn.
    pub with_pointer: bool,
    /// Platform vertical offset added to the final y.
    pub vertical_offset: f64,
    /// Text direction.
    pub direction: LayoutDirection,
}

impl PlacementRequest {
    /// Create a request with no vertical offset in LTR.
    pub fn new(
        anchor: AnchorRect,
        popover: PopoverSize,
        viewport: ViewportSize,
        with_pointer: bool,
    ) -> Self {
        Self {
            anchor,
            popover,
            viewport,
            with_pointer,
            vertical_offset: 0.0,
            direction: LayoutDirection::Ltr,
        }
    }

    /// Set the platform vertical offset.
    pub fn with_vertical_offset(mut self, offset: f64) -> Self {
        self.vertical_offset = offset;
        self
    }

    /// Set the text direction.
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Run the placement engine.
    pub fn compute(&self) -> PlacementResult {
        let resolved = self.popover.resolve(self.viewport);
        let (popover_width, popover_height) = (resolved.x, resolved.y);

        let center = self.anchor.center();
        let quadrant = select_quadrant(center, self.viewport);

        let reference = center + displacement(self.anchor.height, self.with_pointer)
            .component_mul(&quadrant.direction());

        let mut x = reference.x;
        if quadrant.extends_left() {
            x -= popover_width;
        }
        let x = clamp_horizontal(x, popover_width, self.viewport.width, quadrant);

        let placed_below_midline = self.anchor.y > reference.y;
        let y = if !self.popover.height.is_fixed() && placed_below_midline {
            VerticalOffset::Bottom(self.viewport.height - (reference.y + self.vertical_offset))
        } else if placed_below_midline {
            VerticalOffset::Top(reference.y - popover_height + self.vertical_offset)
        } else {
            VerticalOffset::Top(reference.y + self.vertical_offset)
        };

        log::trace!(
            "placement: anchor={:?} viewport={:?} quadrant={:?} x={:.3} y={:?}",
            self.anchor,
            self.viewport,
            quadrant,
            x,
            y
        );

        PlacementResult {
            x,
            y,
            placed_below_midline,
            quadrant,
            direction: self.direction.resolve(),
        }
    }
}

/// Compute where to draw a popover of `popover` size next to `anchor`.
///
/// Pure and deterministic. Uses no platform offset and LTR; see
/// [PlacementRequest] for the full form.
pub fn compute_placement(
    anchor: AnchorRect,
    popover: PopoverSize,
    viewport: ViewportSize,
    with_pointer: bool,
) -> PlacementResult {
    PlacementRequest::new(anchor, popover, viewport, with_pointer).compute()
}

/// Score each quadrant around `center` and return the largest.
///
/// Ties resolve to the earliest quadrant in [Quadrant::ALL].
pub fn select_quadrant(center: Point2<f64>, viewport: ViewportSize) -> Quadrant {
    let areas = quadrant_areas(center, viewport);
    let mut best = 0;
    for (index, area) in areas.iter().enumerate().skip(1) {
        if *area > areas[best] {
            best = index;
        }
    }
    Quadrant::ALL[best]
}

/// Scores of the four quadrants, in [Quadrant::ALL] order.
pub fn quadrant_areas(center: Point2<f64>, viewport: ViewportSize) -> [f64; 4] {
    let top = Point2::new(center.x, 0.0);
    let right = Point2::new(viewport.width, center.y);
    let bottom = Point2::new(center.x, viewport.height);
    let left = Point2::new(0.0, center.y);

    let up = nalgebra::distance(&center, &top);
    let down = nalgebra::distance(&center, &bottom);
    let to_left = nalgebra::distance(&center, &left);
    let to_right = nalgebra::distance(&center, &right);

    [up * to_left, up * to_right, down * to_right, down * to_left]
}

/// Top-left corner of the pointer decoration.
///
/// The pointer is centered on the anchor horizontally. It sits on the
/// anchor's top edge when the popover is above, and on its bottom edge
/// otherwise. The returned x is an offset from the leading edge, like
/// [PlacementResult::x].
pub fn pointer_origin(anchor: AnchorRect, placed_below_midline: bool) -> Point2<f64> {
    let x = anchor.x + anchor.width / 2.0 - POINTER_HALF_WIDTH;
    let y = if placed_below_midline {
        anchor.y - POINTER_ABOVE_OFFSET
    } else {
        anchor.bottom() - POINTER_BELOW_OVERLAP
    };
    Point2::new(x, y)
}

fn displacement(anchor_height: f64, with_pointer: bool) -> Vector2<f64> {
    if with_pointer {
        Vector2::new(POINTER_CLEARANCE_X, anchor_height / 2.0 + POINTER_CLEARANCE_Y)
    } else {
        Vector2::new(HORIZONTAL_EPSILON, anchor_height / 2.0)
    }
}

fn clamp_horizontal(x: f64, popover_width: f64, viewport_width: f64, quadrant: Quadrant) -> f64 {
    let mut x = x;
    if quadrant.extends_left() {
        if x < 0.0 {
            x = SCREEN_MARGIN;
        } else if x + popover_width > viewport_width {
            x = viewport_width - SCREEN_MARGIN;
        }
    } else if x + popover_width > viewport_width {
        x -= x + popover_width - viewport_width + SCREEN_MARGIN;
    }

    // The margins above can push a near-full-width popover past an edge.
    if popover_width <= viewport_width {
        x.clamp(0.0, viewport_width - popover_width)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;

    fn fixed(width: f64, height: f64) -> PopoverSize {
        PopoverSize::new(width, height)
    }

    #[test]
    fn test_areas_near_left_edge() {
        let areas = quadrant_areas(Point2::new(70.0, 520.0), ViewportSize::new(800.0, 1000.0));
        assert_eq!(areas, [520.0 * 70.0, 520.0 * 730.0, 480.0 * 730.0, 480.0 * 70.0]);
    }

    #[test]
    fn test_anchor_near_left_edge_mid_screen() {
        let anchor = AnchorRect::new(20.0, 500.0, 100.0, 40.0);
        let viewport = ViewportSize::new(800.0, 1000.0);
        let result = compute_placement(anchor, fixed(150.0, 40.0), viewport, true);

        // More room above (520) than below (480), and far more to the right.
        assert_eq!(result.quadrant, Quadrant::TopRight);
        assert_eq!(result.x, 70.0 + POINTER_CLEARANCE_X);
        assert!(result.x >= SCREEN_MARGIN && result.x <= 650.0);

        // Reference y = 520 - (20 + 10) = 490, the anchor top (500) is below it.
        assert!(result.placed_below_midline);
        assert_eq!(result.y, VerticalOffset::Top(490.0 - 40.0));
    }

    #[test]
    fn test_anchor_in_top_left_corner_opens_bottom_right() {
        let anchor = AnchorRect::new(0.0, 0.0, 50.0, 20.0);
        let viewport = ViewportSize::new(400.0, 800.0);

        let result = compute_placement(anchor, fixed(150.0, 40.0), viewport, false);
        assert_eq!(result.quadrant, Quadrant::BottomRight);
        assert!(!result.placed_below_midline);
        assert_eq!(result.x, 25.0 + HORIZONTAL_EPSILON);
        assert_eq!(result.y, VerticalOffset::Top(20.0));

        let with_pointer = compute_placement(anchor, fixed(150.0, 40.0), viewport, true);
        assert!(with_pointer.x >= SCREEN_MARGIN);
        assert_eq!(with_pointer.y, VerticalOffset::Top(30.0));
    }

    #[test]
    fn test_bottom_left_quadrant_aligns_right_edge() {
        let anchor = AnchorRect::new(700.0, 100.0, 60.0, 20.0);
        let viewport = ViewportSize::new(800.0, 1000.0);
        let result = compute_placement(anchor, fixed(150.0, 40.0), viewport, true);

        assert_eq!(result.quadrant, Quadrant::BottomLeft);
        assert_eq!(result.x, 730.0 - POINTER_CLEARANCE_X - 150.0);
        assert_eq!(result.y, VerticalOffset::Top(110.0 + 10.0 + 10.0));
    }

    #[test]
    fn test_left_quadrant_clamps_to_margin() {
        // Left quadrant wins but the popover is wider than the room on the left.
        let anchor = AnchorRect::new(300.0, 900.0, 20.0, 20.0);
        let viewport = ViewportSize::new(400.0, 1000.0);
        let result = compute_placement(anchor, fixed(350.0, 40.0), viewport, true);

        assert_eq!(result.quadrant, Quadrant::TopLeft);
        assert_eq!(result.x, SCREEN_MARGIN);
    }

    #[test]
    fn test_right_quadrant_shifts_by_overflow_and_margin() {
        let anchor = AnchorRect::new(100.0, 100.0, 20.0, 20.0);
        let viewport = ViewportSize::new(300.0, 1000.0);
        let result = compute_placement(anchor, fixed(200.0, 40.0), viewport, true);

        assert_eq!(result.quadrant, Quadrant::BottomRight);
        // 110 + 18 = 128, overflow 28, pulled back by 28 + 10.
        assert_eq!(result.x, 90.0);
    }

    #[test]
    fn test_ties_prefer_declaration_order() {
        let viewport = ViewportSize::new(400.0, 400.0);
        assert_eq!(select_quadrant(Point2::new(200.0, 200.0), viewport), Quadrant::TopLeft);
        assert_eq!(select_quadrant(Point2::new(0.0, 0.0), viewport), Quadrant::BottomRight);
        // All four areas are zero.
        assert_eq!(
            select_quadrant(Point2::new(0.0, 0.0), ViewportSize::default()),
            Quadrant::TopLeft
        );
    }

    #[test]
    fn test_unmeasured_anchor_degrades_to_corner() {
        let viewport = ViewportSize::new(400.0, 800.0);
        let result = compute_placement(AnchorRect::default(), fixed(150.0, 40.0), viewport, false);
        assert_eq!(result.quadrant, Quadrant::BottomRight);
        assert_eq!(result.x, HORIZONTAL_EPSILON);
        assert_eq!(result.y, VerticalOffset::Top(0.0));
    }

    #[test]
    fn test_zero_sized_popover_is_defined() {
        let anchor = AnchorRect::new(50.0, 50.0, 0.0, 0.0);
        let viewport = ViewportSize::new(100.0, 100.0);
        let result = compute_placement(anchor, fixed(0.0, 0.0), viewport, false);
        assert!(result.x.is_finite());
        assert_eq!(result.quadrant, Quadrant::TopLeft);
        assert_eq!(result.y.top(0.0, 100.0), 50.0);
    }

    #[test]
    fn test_deterministic() {
        let anchor = AnchorRect::new(123.0, 456.0, 78.0, 9.0);
        let viewport = ViewportSize::new(390.0, 844.0);
        let first = compute_placement(anchor, fixed(150.0, 40.0), viewport, true);
        for _ in 0..10 {
            assert_eq!(compute_placement(anchor, fixed(150.0, 40.0), viewport, true), first);
        }
    }

    #[test]
    fn test_percent_width_resolves_against_viewport() {
        let anchor = AnchorRect::new(700.0, 100.0, 60.0, 20.0);
        let viewport = ViewportSize::new(800.0, 1000.0);
        let popover = PopoverSize::new(Dimension::Percent(25.0), 40.0);
        let result = compute_placement(anchor, popover, viewport, false);
        assert_eq!(result.quadrant, Quadrant::BottomLeft);
        assert_eq!(result.x, 730.0 - HORIZONTAL_EPSILON - 200.0);
    }

    #[test]
    fn test_intrinsic_height_above_anchor_uses_bottom_offset() {
        let anchor = AnchorRect::new(20.0, 900.0, 100.0, 40.0);
        let viewport = ViewportSize::new(800.0, 1000.0);
        let popover = PopoverSize::new(150.0, Dimension::Auto);
        let request =
            PlacementRequest::new(anchor, popover, viewport, true).with_vertical_offset(24.0);
        let result = request.compute();

        assert_eq!(result.quadrant, Quadrant::TopRight);
        assert!(result.placed_below_midline);
        // Reference y = 920 - 30 = 890.
        assert_eq!(result.y, VerticalOffset::Bottom(1000.0 - (890.0 + 24.0)));
    }

    #[test]
    fn test_vertical_offset_is_added() {
        let anchor = AnchorRect::new(0.0, 0.0, 50.0, 20.0);
        let viewport = ViewportSize::new(400.0, 800.0);
        let result = PlacementRequest::new(anchor, fixed(150.0, 40.0), viewport, true)
            .with_vertical_offset(24.0)
            .compute();
        assert_eq!(result.y, VerticalOffset::Top(30.0 + 24.0));
    }

    #[test]
    fn test_rtl_mirrors_left_edge() {
        let viewport = ViewportSize::new(800.0, 1000.0);
        let popover = fixed(150.0, 40.0);
        for anchor in [
            AnchorRect::new(20.0, 500.0, 100.0, 40.0),
            AnchorRect::new(700.0, 100.0, 60.0, 20.0),
            AnchorRect::new(380.0, 900.0, 10.0, 10.0),
        ] {
            let ltr = compute_placement(anchor, popover, viewport, true);
            let rtl = PlacementRequest::new(anchor, popover, viewport, true)
                .with_direction(LayoutDirection::Rtl)
                .compute();

            assert_eq!(rtl.quadrant, ltr.quadrant);
            assert_eq!(rtl.y, ltr.y);
            let expected = viewport.width - ltr.x - 150.0;
            assert!((rtl.left_edge(viewport.width, 150.0) - expected).abs() < 1e-9);
            assert_eq!(ltr.left_edge(viewport.width, 150.0), ltr.x);
        }
    }

    #[test]
    fn test_popover_stays_on_screen() {
        let viewport = ViewportSize::new(360.0, 640.0);
        for width in [0.0, 40.0, 150.0, 300.0, 345.0, 355.0, 360.0] {
            for step_x in 0..=12 {
                for step_y in 0..=8 {
                    let anchor = AnchorRect::new(
                        viewport.width * step_x as f64 / 12.0,
                        viewport.height * step_y as f64 / 8.0,
                        24.0,
                        24.0,
                    );
                    for with_pointer in [false, true] {
                        let result =
                            compute_placement(anchor, fixed(width, 40.0), viewport, with_pointer);
                        assert!(result.x >= 0.0, "x={} anchor={:?}", result.x, anchor);
                        assert!(
                            result.x + width <= viewport.width,
                            "x={} width={} anchor={:?}",
                            result.x,
                            width,
                            anchor
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_pointer_origin() {
        let anchor = AnchorRect::new(20.0, 500.0, 100.0, 40.0);
        assert_eq!(pointer_origin(anchor, true), Point2::new(62.5, 487.0));
        assert_eq!(pointer_origin(anchor, false), Point2::new(62.5, 538.0));
    }
}
