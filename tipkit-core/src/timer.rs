use std::time::{Duration, Instant};

/// Delay after first display before the anchor is measured again.
///
/// Geometry reported at initial paint may still be moving (layout
/// animations in flight).
pub const SETTLE_DELAY_MS: u64 = 500;

/// A cancellable one-shot deadline, polled by the host event loop.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay: Duration,
    fire_at: Option<Instant>,
}

impl SettleTimer {
    /// Create an unscheduled timer with the default settle delay.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(SETTLE_DELAY_MS))
    }

    /// Create an unscheduled timer with a custom delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            fire_at: None,
        }
    }

    /// Arm the timer relative to `now`. Re-arming moves the deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.fire_at = Some(now + self.delay);
    }

    /// Disarm the timer. A cancelled timer never fires.
    pub fn cancel(&mut self) {
        self.fire_at = None;
    }

    /// Whether the timer is armed.
    pub fn is_pending(&self) -> bool {
        self.fire_at.is_some()
    }

    /// The armed deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.fire_at
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.fire_at {
            Some(fire_at) if now >= fire_at => {
                self.fire_at = None;
                true
            },
            _ => false,
        }
    }
}

impl Default for SettleTimer {
    fn default() -> Self {
        Self::new()
    }
}
