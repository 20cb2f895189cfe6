// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visibility and measurement state of a single tooltip.
//!
//! All events (trigger fired, measurement completed, timer due, external
//! visibility changed) are handled to completion on the host's event loop.
//! Nothing here is shared between widgets or across threads.

use crate::geometry::{AnchorRect, PopoverSize};
use crate::host::{CloseNotification, ElementId, GeometryProvider};
use crate::measure::AnchorCell;
use crate::placement::{PlacementRequest, PlacementResult};
use crate::timer::SettleTimer;
use crate::update::Update;
use std::time::Instant;

/// Who owns the visibility flag. Fixed for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityMode {
    /// The application owns the flag. The controller mirrors the last value
    /// it was told and asks for changes through `on_visibility_change`.
    Controlled {
        /// Last value reported by the application.
        visible: bool,
    },
    /// The controller owns the flag.
    Uncontrolled {
        /// Current visibility.
        visible: bool,
    },
}

impl VisibilityMode {
    /// Controlled when an external value is supplied, uncontrolled and hidden otherwise.
    pub fn from_external(external: Option<bool>) -> Self {
        match external {
            Some(visible) => VisibilityMode::Controlled { visible },
            None => VisibilityMode::Uncontrolled { visible: false },
        }
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        match self {
            VisibilityMode::Controlled { visible } | VisibilityMode::Uncontrolled { visible } => {
                *visible
            },
        }
    }

    /// Whether the application owns the flag.
    pub fn is_controlled(&self) -> bool {
        matches!(self, VisibilityMode::Controlled { .. })
    }
}

/// Lifecycle notifications of a tooltip.
#[derive(Default)]
pub struct TooltipCallbacks {
    visibility_change: Option<Box<dyn FnMut(bool)>>,
    open: Option<Box<dyn FnMut()>>,
    close: Option<Box<dyn FnMut()>>,
}

impl TooltipCallbacks {
    /// Create an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called in controlled mode with the visibility the controller wants.
    pub fn with_visibility_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.visibility_change = Some(Box::new(callback));
        self
    }

    /// Called once the host reports the popover as shown.
    pub fn with_open(mut self, callback: impl FnMut() + 'static) -> Self {
        self.open = Some(Box::new(callback));
        self
    }

    /// Called when the popover is closed.
    pub fn with_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.close = Some(Box::new(callback));
        self
    }

    fn visibility_change(&mut self, visible: bool) {
        if let Some(callback) = self.visibility_change.as_mut() {
            callback(visible);
        }
    }

    fn open(&mut self) {
        if let Some(callback) = self.open.as_mut() {
            callback();
        }
    }

    fn close(&mut self) {
        if let Some(callback) = self.close.as_mut() {
            callback();
        }
    }
}

/// Tracks whether the popover is shown and keeps the anchor geometry fresh.
pub struct VisibilityController<G: GeometryProvider> {
    host: G,
    element: ElementId,
    mode: VisibilityMode,
    anchor: AnchorCell,
    settle: SettleTimer,
    close_policy: CloseNotification,
    callbacks: TooltipCallbacks,
    open_notified: bool,
    close_pending: bool,
    seen_generation: u64,
    mounted: bool,
    torn_down: bool,
}

impl<G: GeometryProvider> VisibilityController<G> {
    /// Create a controller for `element`.
    ///
    /// Passing `Some(visible)` as `external` puts the controller in
    /// controlled mode for its whole lifetime.
    pub fn new(
        host: G,
        element: ElementId,
        external: Option<bool>,
        close_policy: CloseNotification,
        callbacks: TooltipCallbacks,
    ) -> Self {
        let mode = VisibilityMode::from_external(external);
        log::debug!("Tooltip {:?} created in {:?} mode", element, mode);
        Self {
            host,
            element,
            mode,
            anchor: AnchorCell::new(),
            settle: SettleTimer::new(),
            close_policy,
            callbacks,
            open_notified: false,
            close_pending: false,
            seen_generation: 0,
            mounted: false,
            torn_down: false,
        }
    }

    /// The widget was displayed for the first time: schedule the one-shot
    /// settle re-measurement. Later calls are ignored.
    pub fn mount(&mut self, now: Instant) {
        if self.torn_down || self.mounted {
            return;
        }
        self.mounted = true;
        self.settle.schedule(now);
    }

    /// Poll timers and pending measurements.
    ///
    /// Returns [Update::DRAW] when the settle timer fired or a new anchor
    /// measurement landed since the last call.
    pub fn update(&mut self, now: Instant) -> Update {
        if self.torn_down {
            return Update::empty();
        }

        let mut update = Update::empty();
        if self.settle.poll(now) {
            log::debug!("Tooltip {:?}: settle timer fired", self.element);
            self.measure_anchor();
            update |= Update::DRAW;
        }

        let generation = self.anchor.applied_generation();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            update |= Update::DRAW;
        }
        update
    }

    /// The trigger gesture fired.
    pub fn on_trigger_fired(&mut self) -> Update {
        if self.torn_down {
            log::warn!("Tooltip {:?}: trigger fired after teardown", self.element);
            return Update::empty();
        }

        self.measure_anchor();

        let was_visible = self.mode.is_visible();
        match &mut self.mode {
            VisibilityMode::Uncontrolled { visible } => {
                *visible = !was_visible;
                log::debug!("Tooltip {:?}: visible={}", self.element, !was_visible);
                if was_visible {
                    self.hidden();
                } else {
                    self.open_notified = false;
                    self.close_pending = false;
                }
            },
            VisibilityMode::Controlled { .. } => {
                log::debug!(
                    "Tooltip {:?}: requesting visible={}",
                    self.element,
                    !was_visible
                );
                self.callbacks.visibility_change(!was_visible);
                if was_visible && self.close_policy == CloseNotification::Explicit {
                    self.callbacks.close();
                }
            },
        }

        Update::ALL
    }

    /// Ask the host for the anchor's current on-screen rectangle.
    ///
    /// The result lands asynchronously; until then placement uses the last
    /// known geometry.
    pub fn measure_anchor(&mut self) {
        if self.torn_down {
            return;
        }
        let ticket = self.anchor.request();
        log::trace!(
            "Tooltip {:?}: measurement #{} requested",
            self.element,
            ticket.generation()
        );
        self.host.measure_in_window(self.element, ticket);
    }

    /// The application changed the visibility it owns.
    ///
    /// Ignored in uncontrolled mode.
    pub fn set_external_visibility(&mut self, value: bool) -> Update {
        if self.torn_down {
            return Update::empty();
        }
        match &mut self.mode {
            VisibilityMode::Controlled { visible } => {
                if *visible == value {
                    return Update::empty();
                }
                *visible = value;
                log::debug!("Tooltip {:?}: visible={} (external)", self.element, value);
                self.open_notified = false;
                self.close_pending =
                    !value && self.close_policy == CloseNotification::OverlayDismiss;
                Update::ALL
            },
            VisibilityMode::Uncontrolled { .. } => {
                log::warn!(
                    "Tooltip {:?}: external visibility ignored, tooltip is uncontrolled",
                    self.element
                );
                Update::empty()
            },
        }
    }

    /// The host finished presenting the popover.
    ///
    /// Invokes `on_open` once per transition to visible.
    pub fn on_popover_shown(&mut self) {
        if self.torn_down || !self.mode.is_visible() || self.open_notified {
            return;
        }
        self.open_notified = true;
        self.callbacks.open();
    }

    /// The host's overlay reported its own dismissal.
    ///
    /// Invokes `on_close` only under [CloseNotification::OverlayDismiss],
    /// once per transition to hidden.
    pub fn on_overlay_dismissed(&mut self) {
        if self.torn_down || !self.close_pending {
            return;
        }
        self.close_pending = false;
        self.callbacks.close();
    }

    /// Cancel the settle timer and detach from pending measurements.
    ///
    /// Every later event is a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.settle.cancel();
        self.anchor.dispose();
        self.torn_down = true;
        log::debug!("Tooltip {:?} torn down", self.element);
    }

    /// Run the placement engine against the latest anchor geometry and the
    /// host's current viewport.
    pub fn placement(
        &self,
        popover: PopoverSize,
        with_pointer: bool,
        apply_vertical_offset: bool,
    ) -> PlacementResult {
        let offset = if apply_vertical_offset {
            self.host.platform_vertical_offset()
        } else {
            0.0
        };
        PlacementRequest::new(
            self.anchor.rect(),
            popover,
            self.host.viewport_size(),
            with_pointer,
        )
        .with_vertical_offset(offset)
        .with_direction(self.host.layout_direction())
        .compute()
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.mode.is_visible()
    }

    /// The visibility mode.
    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    /// The latest known anchor geometry.
    pub fn anchor(&self) -> AnchorRect {
        self.anchor.rect()
    }

    /// Whether any anchor measurement has landed.
    pub fn is_measured(&self) -> bool {
        self.anchor.is_measured()
    }

    /// Whether the settle re-measurement is still scheduled.
    pub fn is_settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    /// Whether [VisibilityController::teardown] was called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The close notification policy.
    pub fn close_policy(&self) -> CloseNotification {
        self.close_policy
    }

    /// The host geometry provider.
    pub fn host(&self) -> &G {
        &self.host
    }

    fn hidden(&mut self) {
        self.open_notified = false;
        match self.close_policy {
            CloseNotification::Explicit => self.callbacks.close(),
            CloseNotification::OverlayDismiss => self.close_pending = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ViewportSize;
    use crate::measure::MeasureTicket;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct TestHost {
        tickets: RefCell<Vec<MeasureTicket>>,
    }

    impl TestHost {
        fn complete_all(&self, rect: AnchorRect) {
            for ticket in self.tickets.borrow_mut().drain(..) {
                ticket.complete(rect);
            }
        }

        fn pending(&self) -> usize {
            self.tickets.borrow().len()
        }
    }

    impl GeometryProvider for TestHost {
        fn viewport_size(&self) -> ViewportSize {
            ViewportSize::new(400.0, 800.0)
        }

        fn measure_in_window(&self, _element: ElementId, ticket: MeasureTicket) {
            self.tickets.borrow_mut().push(ticket);
        }
    }

    #[derive(Default)]
    struct Counters {
        changes: RefCell<Vec<bool>>,
        opens: Cell<u32>,
        closes: Cell<u32>,
    }

    fn callbacks(counters: &Rc<Counters>) -> TooltipCallbacks {
        let changes = counters.clone();
        let opens = counters.clone();
        let closes = counters.clone();
        TooltipCallbacks::new()
            .with_visibility_change(move |visible| changes.changes.borrow_mut().push(visible))
            .with_open(move || opens.opens.set(opens.opens.get() + 1))
            .with_close(move || closes.closes.set(closes.closes.get() + 1))
    }

    fn controller(
        host: &Rc<TestHost>,
        counters: &Rc<Counters>,
        external: Option<bool>,
        policy: CloseNotification,
    ) -> VisibilityController<Rc<TestHost>> {
        VisibilityController::new(
            host.clone(),
            ElementId::new(1),
            external,
            policy,
            callbacks(counters),
        )
    }

    #[test]
    fn test_uncontrolled_trigger_shows_without_callbacks() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);

        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.on_trigger_fired(), Update::ALL);
        assert!(tooltip.is_visible());
        assert_eq!(host.pending(), 1);
        assert_eq!(counters.opens.get(), 0);
        assert_eq!(counters.closes.get(), 0);
        assert!(counters.changes.borrow().is_empty());
    }

    #[test]
    fn test_uncontrolled_close_invokes_on_close_once() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);

        tooltip.on_trigger_fired();
        tooltip.on_popover_shown();
        tooltip.on_popover_shown();
        assert_eq!(counters.opens.get(), 1);

        tooltip.on_trigger_fired();
        assert!(!tooltip.is_visible());
        assert_eq!(counters.closes.get(), 1);

        // Explicit policy: the overlay's own dismissal does not notify again.
        tooltip.on_overlay_dismissed();
        assert_eq!(counters.closes.get(), 1);
        assert!(counters.changes.borrow().is_empty());
    }

    #[test]
    fn test_overlay_dismiss_policy_defers_close() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::OverlayDismiss);

        tooltip.on_trigger_fired();
        tooltip.on_trigger_fired();
        assert_eq!(counters.closes.get(), 0);

        tooltip.on_overlay_dismissed();
        tooltip.on_overlay_dismissed();
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_controlled_never_mutates_own_flag() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, Some(false), CloseNotification::Explicit);

        assert!(tooltip.mode().is_controlled());
        tooltip.on_trigger_fired();
        assert!(!tooltip.is_visible());
        assert_eq!(*counters.changes.borrow(), vec![true]);

        tooltip.on_trigger_fired();
        assert_eq!(*counters.changes.borrow(), vec![true, true]);
        assert_eq!(counters.closes.get(), 0);
    }

    #[test]
    fn test_controlled_close_request() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, Some(true), CloseNotification::Explicit);

        tooltip.on_trigger_fired();
        assert_eq!(*counters.changes.borrow(), vec![false]);
        assert_eq!(counters.closes.get(), 1);
        assert!(tooltip.is_visible());

        assert_eq!(tooltip.set_external_visibility(false), Update::ALL);
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.set_external_visibility(false), Update::empty());
    }

    #[test]
    fn test_controlled_overlay_dismiss_after_external_hide() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip =
            controller(&host, &counters, Some(true), CloseNotification::OverlayDismiss);

        tooltip.on_trigger_fired();
        assert_eq!(counters.closes.get(), 0);
        tooltip.set_external_visibility(false);
        tooltip.on_overlay_dismissed();
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_uncontrolled_ignores_external_visibility() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);

        assert_eq!(tooltip.set_external_visibility(true), Update::empty());
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_settle_timer_remeasures_once() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);
        let start = Instant::now();

        tooltip.mount(start);
        assert!(tooltip.is_settle_pending());
        assert_eq!(tooltip.update(start + Duration::from_millis(100)), Update::empty());
        assert_eq!(host.pending(), 0);

        assert_eq!(tooltip.update(start + Duration::from_millis(500)), Update::DRAW);
        assert_eq!(host.pending(), 1);
        assert_eq!(tooltip.update(start + Duration::from_secs(2)), Update::empty());
        assert_eq!(host.pending(), 1);
    }

    #[test]
    fn test_second_mount_does_not_rearm() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);
        let start = Instant::now();

        tooltip.mount(start);
        assert_eq!(tooltip.update(start + Duration::from_millis(500)), Update::DRAW);
        tooltip.mount(start + Duration::from_secs(1));
        assert!(!tooltip.is_settle_pending());
        assert_eq!(tooltip.update(start + Duration::from_secs(2)), Update::empty());
        assert_eq!(host.pending(), 1);
    }

    #[test]
    fn test_reopen_clears_pending_close() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::OverlayDismiss);

        tooltip.on_trigger_fired();
        tooltip.on_trigger_fired();
        tooltip.on_trigger_fired();
        assert!(tooltip.is_visible());
        tooltip.on_overlay_dismissed();
        assert_eq!(counters.closes.get(), 0);

        let mut controlled = controller(
            &host,
            &counters,
            Some(true),
            CloseNotification::OverlayDismiss,
        );
        controlled.set_external_visibility(false);
        controlled.set_external_visibility(true);
        controlled.on_overlay_dismissed();
        assert_eq!(counters.closes.get(), 0);

        controlled.set_external_visibility(false);
        controlled.on_overlay_dismissed();
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_measurement_landing_requests_redraw() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);
        let now = Instant::now();

        tooltip.on_trigger_fired();
        assert!(!tooltip.is_measured());
        host.complete_all(AnchorRect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(tooltip.update(now), Update::DRAW);
        assert_eq!(tooltip.update(now), Update::empty());
        assert_eq!(tooltip.anchor(), AnchorRect::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_teardown_cancels_timer_and_pending_measurement() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);
        let start = Instant::now();

        tooltip.mount(start);
        tooltip.measure_anchor();
        tooltip.teardown();

        assert!(!tooltip.is_settle_pending());
        host.complete_all(AnchorRect::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(tooltip.anchor(), AnchorRect::default());
        assert_eq!(tooltip.update(start + Duration::from_secs(1)), Update::empty());
        assert_eq!(tooltip.on_trigger_fired(), Update::empty());
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_repeated_measurement_is_idempotent() {
        let host = Rc::new(TestHost::default());
        let counters = Rc::new(Counters::default());
        let mut tooltip = controller(&host, &counters, None, CloseNotification::Explicit);
        let anchor = AnchorRect::new(20.0, 500.0, 100.0, 40.0);
        let size = PopoverSize::default();

        tooltip.measure_anchor();
        host.complete_all(anchor);
        let first = tooltip.placement(size, true, true);

        tooltip.measure_anchor();
        host.complete_all(anchor);
        assert_eq!(tooltip.placement(size, true, true), first);
    }
}
