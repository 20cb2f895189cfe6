// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::{Gesture, TooltipConfig};
use crate::layers::{
    HighlightLayer, HorizontalEdge, OverlayLayer, PointerLayer, PopoverLayer, TooltipLayers,
};
use std::time::Instant;
use tipkit_core::geometry::AnchorRect;
use tipkit_core::host::{CloseNotification, ElementId, GeometryProvider};
use tipkit_core::placement::{pointer_origin, PlacementResult};
use tipkit_core::visibility::{TooltipCallbacks, VisibilityController, VisibilityMode};
use tipkit_core::{ConfigResult, Update};
use vello::kurbo::{Rect, Size};

/// A popover attached to a trigger element.
///
/// The host forwards gestures and lifecycle events to the tooltip and paints
/// whatever [Tooltip::render] returns.
///
/// ### Lifecycle
/// - [Tooltip::mount] when the trigger is first displayed
/// - [Tooltip::update] on every frame, to fire the settle timer
/// - [Tooltip::on_popover_shown] once the popover was presented
/// - [Tooltip::teardown] before dropping the widget
pub struct Tooltip<G: GeometryProvider> {
    config: TooltipConfig,
    controller: VisibilityController<G>,
}

impl<G: GeometryProvider> Tooltip<G> {
    /// Create a tooltip for the trigger `element`.
    ///
    /// Fails if the configuration is invalid.
    pub fn new(
        config: TooltipConfig,
        host: G,
        element: ElementId,
        callbacks: TooltipCallbacks,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let close_policy = config
            .close_notification
            .unwrap_or_else(|| CloseNotification::for_platform(host.platform()));
        let controller =
            VisibilityController::new(host, element, config.is_visible, close_policy, callbacks);
        Ok(Self { config, controller })
    }

    /// The configuration.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The visibility controller.
    pub fn controller(&self) -> &VisibilityController<G> {
        &self.controller
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.controller.is_visible()
    }

    /// The visibility mode.
    pub fn mode(&self) -> VisibilityMode {
        self.controller.mode()
    }

    /// See [VisibilityController::mount].
    pub fn mount(&mut self, now: Instant) {
        self.controller.mount(now);
    }

    /// See [VisibilityController::update].
    pub fn update(&mut self, now: Instant) -> Update {
        self.controller.update(now)
    }

    /// See [VisibilityController::teardown].
    pub fn teardown(&mut self) {
        self.controller.teardown();
    }

    /// A gesture was recognized on the trigger.
    pub fn on_gesture(&mut self, gesture: Gesture) -> Update {
        if !self.config.action_type.accepts(gesture) {
            log::trace!(
                "Ignoring {:?}, tooltip reacts to {:?}",
                gesture,
                self.config.action_type
            );
            return Update::empty();
        }
        self.controller.on_trigger_fired()
    }

    /// The dimming layer was pressed.
    pub fn on_backdrop_press(&mut self) -> Update {
        self.dismiss()
    }

    /// The popover itself was pressed.
    pub fn on_popover_press(&mut self) -> Update {
        if self.config.close_only_on_backdrop_press {
            return Update::empty();
        }
        self.dismiss()
    }

    /// The host finished presenting the popover.
    pub fn on_popover_shown(&mut self) {
        self.controller.on_popover_shown();
    }

    /// The host's overlay reported its own dismissal.
    pub fn on_overlay_dismissed(&mut self) {
        self.controller.on_overlay_dismissed();
    }

    /// The application changed the visibility it owns (controlled mode).
    pub fn set_visible(&mut self, visible: bool) -> Update {
        self.controller.set_external_visibility(visible)
    }

    /// Placement of the popover against the latest anchor geometry.
    pub fn placement(&self) -> PlacementResult {
        self.controller.placement(
            self.config.popover_size(),
            self.config.with_pointer,
            !self.config.skip_platform_offset,
        )
    }

    /// Describe what to paint.
    ///
    /// Without `want_popover_layer` only the trigger wrapper is returned.
    /// Otherwise the overlay, highlight, pointer and popover are included,
    /// placed against the latest known anchor geometry, which may be stale
    /// while a measurement is in flight.
    pub fn render(&self, want_popover_layer: bool) -> TooltipLayers {
        let mut layers = TooltipLayers::trigger_only(self.config.action_type);
        if !want_popover_layer {
            return layers;
        }

        let host = self.controller.host();
        let viewport = host.viewport_size();
        let direction = host.layout_direction();
        let anchor = self.controller.anchor();
        let style = &self.config.style;
        let placement = self.placement();

        if self.config.with_overlay {
            layers.overlay = Some(OverlayLayer {
                bounds: Rect::new(0.0, 0.0, viewport.width, viewport.height),
                color: style.overlay_color,
            });
        }

        layers.highlight = Some(HighlightLayer {
            horizontal: HorizontalEdge::leading(direction, anchor.x),
            top: anchor.y,
            size: Size::new(anchor.width, anchor.height),
            color: style.highlight_color,
        });

        if self.config.with_pointer {
            layers.pointer = Some(self.pointer_layer(anchor, &placement));
        }

        let size = self.config.popover_size();
        let resolved = size.resolve(viewport);
        layers.popover = Some(PopoverLayer {
            horizontal: HorizontalEdge::leading(direction, placement.x),
            vertical: placement.y,
            width: resolved.x,
            height: (!size.height.is_auto()).then_some(resolved.y),
            background_color: style.background_color,
            corner_radius: style.corner_radius,
            padding: style.padding,
        });
        layers
    }

    fn pointer_layer(&self, anchor: AnchorRect, placement: &PlacementResult) -> PointerLayer {
        let origin = pointer_origin(anchor, placement.placed_below_midline);
        PointerLayer {
            horizontal: HorizontalEdge::leading(placement.direction, origin.x),
            top: origin.y,
            size: PointerLayer::SIZE,
            points_down: placement.placed_below_midline,
            color: self.config.style.resolved_pointer_color(),
        }
    }

    fn dismiss(&mut self) -> Update {
        if !self.controller.is_visible() {
            return Update::empty();
        }
        self.controller.on_trigger_fired()
    }
}
