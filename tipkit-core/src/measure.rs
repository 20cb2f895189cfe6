// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bookkeeping for asynchronous anchor measurement.
//!
//! Every measurement request hands the host a [MeasureTicket]. Tickets hold
//! only a weak reference to the [AnchorCell] that issued them, so a result
//! arriving after the widget was torn down is dropped instead of mutating a
//! disposed controller.

use crate::geometry::AnchorRect;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct MeasureState {
    rect: AnchorRect,
    issued: u64,
    applied: u64,
    disposed: bool,
}

/// Holds the latest measured anchor geometry.
///
/// Results are last-write-wins by request order: once a newer request has
/// landed, a late result of an older one is discarded.
#[derive(Debug, Default)]
pub struct AnchorCell {
    state: Rc<RefCell<MeasureState>>,
}

impl AnchorCell {
    /// Create an empty cell holding the zero rectangle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new measurement.
    pub fn request(&self) -> MeasureTicket {
        let mut state = self.state.borrow_mut();
        state.issued += 1;
        MeasureTicket {
            generation: state.issued,
            cell: Rc::downgrade(&self.state),
        }
    }

    /// The latest known geometry. Stale if a request is still in flight.
    pub fn rect(&self) -> AnchorRect {
        self.state.borrow().rect
    }

    /// Whether any measurement has landed yet.
    pub fn is_measured(&self) -> bool {
        self.state.borrow().applied > 0
    }

    /// Generation of the last applied measurement, `0` if none.
    pub fn applied_generation(&self) -> u64 {
        self.state.borrow().applied
    }

    /// Whether a request newer than the last applied one is outstanding.
    pub fn is_pending(&self) -> bool {
        let state = self.state.borrow();
        state.issued > state.applied && !state.disposed
    }

    /// Make every outstanding ticket inert.
    pub fn dispose(&self) {
        self.state.borrow_mut().disposed = true;
    }
}

/// A pending measurement, completed by the host.
#[derive(Debug)]
pub struct MeasureTicket {
    generation: u64,
    cell: Weak<RefCell<MeasureState>>,
}

impl MeasureTicket {
    /// The request number of this ticket, increasing per cell.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deliver the measured rectangle.
    ///
    /// Returns `false` if the result was dropped because the cell is gone or
    /// disposed, or because a newer measurement already landed.
    pub fn complete(self, rect: AnchorRect) -> bool {
        let Some(cell) = self.cell.upgrade() else {
            log::debug!("Dropping measurement #{}: anchor cell is gone", self.generation);
            return false;
        };

        let mut state = cell.borrow_mut();
        if state.disposed {
            log::debug!("Dropping measurement #{}: anchor cell disposed", self.generation);
            return false;
        }
        if self.generation < state.applied {
            log::debug!(
                "Dropping measurement #{}: superseded by #{}",
                self.generation,
                state.applied
            );
            return false;
        }

        state.rect = rect;
        state.applied = self.generation;
        true
    }

    /// Deliver the measured rectangle as the `(x, y, width, height)` tuple
    /// hosts usually report.
    pub fn complete_with(self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.complete(AnchorRect::new(x, y, width, height))
    }
}
