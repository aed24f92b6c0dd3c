//! Zero-cross synchronized switch driver.
//!
//! The tick scheduler only decides what the power switch *should* be.
//! That decision is parked in [`Gate`] and the output pin is touched in
//! exactly one place: the zero-cross edge handler. The switch element
//! therefore only ever commutates while the line voltage is at zero,
//! which bounds inrush current and radiated noise.

use crate::{hw::Board, mutex::IrqCtx};
use portable_atomic::{AtomicBool, Ordering};

pub struct Gate {
    /// Logical state awaiting the next zero crossing.
    pending: AtomicBool,
    /// Mirror of the driven output pin.
    driven: AtomicBool,
}

impl Gate {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            driven: AtomicBool::new(false),
        }
    }

    /// Set the logical gate state. The physical pin is not touched.
    pub fn pend(&self, _c: &IrqCtx<'_>, on: bool) {
        self.pending.store(on, Ordering::SeqCst);
    }

    /// Zero-cross edge event. Applies the pending logical state to the
    /// output pin.
    pub fn irq_zero_cross(&self, _c: &IrqCtx<'_>, b: &mut impl Board) {
        // Drop the edge indication before anything else, so that this
        // handler cannot be retriggered by the edge it is servicing.
        b.ack_zero_cross();

        let on = self.pending.load(Ordering::SeqCst);
        b.set_gate(on);
        self.driven.store(on, Ordering::SeqCst);
    }

    /// Level the output pin was last driven to.
    pub fn is_on(&self) -> bool {
        self.driven.load(Ordering::SeqCst)
    }
}

// vim: ts=4 sw=4 expandtab
