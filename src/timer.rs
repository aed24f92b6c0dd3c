//! Carrier tick scheduler.
//!
//! The power switch runs on a slow PWM carrier. The hardware timer
//! counts `PERIOD_TICKS` ticks per period and raises two interrupts:
//! the period start and the duty compare match. Both only decide the
//! *logical* gate level; the physical pin is left to the zero-cross
//! driver.

use crate::{hw::Board, mutex::{IrqCtx, MainCtx}};
use portable_atomic::{AtomicU16, Ordering};

/// Carrier timer clock.
pub const TICK_HZ: u32 = 10_000;

/// Ticks per carrier period. 0.5 Hz carrier, one period is 2 s.
pub const PERIOD_TICKS: u16 = (TICK_HZ * 2) as u16;

pub struct Pwm {
    /// Compare threshold armed for the running period.
    active: AtomicU16,
    /// Threshold to be latched at the next period start.
    next: AtomicU16,
}

impl Pwm {
    pub const fn new() -> Self {
        Self {
            active: AtomicU16::new(0),
            next: AtomicU16::new(0),
        }
    }

    /// Request a new duty cycle, in percent of the carrier period.
    ///
    /// The request is latched at the next period start, so the running
    /// period never sees the threshold change.
    pub fn set_duty(&self, _m: &MainCtx<'_>, percent: u8) {
        let percent = percent.min(100) as u32;
        let ticks = (percent * PERIOD_TICKS as u32 / 100) as u16;
        self.next.store(ticks, Ordering::SeqCst);
    }

    /// Period start event. Latches a pending threshold change into the
    /// hardware compare register and returns the logical gate level for
    /// the new period: on, unless the armed duty is zero.
    ///
    /// At 100 % duty the threshold equals [`PERIOD_TICKS`], which the
    /// counter never reaches, so no compare match interferes and the
    /// level stays on for the whole period.
    pub fn irq_period(&self, _c: &IrqCtx<'_>, b: &mut impl Board) -> bool {
        let next = self.next.load(Ordering::SeqCst);
        if next != self.active.load(Ordering::SeqCst) {
            self.active.store(next, Ordering::SeqCst);
            b.set_pwm_compare(next);
        }
        next > 0
    }
}

// vim: ts=4 sw=4 expandtab
