//! Two step analog acquisition sequencer.
//!
//! Once per carrier period the tick scheduler starts a measurement
//! cycle: the setpoint channel is converted first, then the temperature
//! channel. The main loop is signalled only after the second result has
//! landed, so a control computation always sees both samples of the
//! same cycle.

use crate::{
    hw::Board,
    mutex::{IrqCtx, MainCtx, Mutex},
};
use core::cell::Cell;
use portable_atomic::{AtomicBool, AtomicU16, Ordering};

/// Converter input channels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdcChannel {
    /// User setpoint potentiometer.
    Setpoint,
    /// On-board temperature sensor.
    Temperature,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SeqState {
    Idle,
    AwaitSetpoint,
    AwaitTemperature,
}

pub struct Adc {
    state: Mutex<Cell<SeqState>>,
    setpoint: AtomicU16,
    temperature: AtomicU16,
    done: AtomicBool,
}

impl Adc {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(SeqState::Idle)),
            setpoint: AtomicU16::new(0),
            temperature: AtomicU16::new(0),
            done: AtomicBool::new(false),
        }
    }

    /// Begin a new measurement cycle with a setpoint conversion.
    ///
    /// A cycle that is still in flight is abandoned and restarted.
    /// There is no conversion timeout; a cycle that stalls is caught by
    /// the liveness watchdog, not here.
    pub fn start_cycle(&self, c: &IrqCtx<'_>, b: &mut impl Board) {
        self.state.borrow(c.cs()).set(SeqState::AwaitSetpoint);
        b.adc_start(AdcChannel::Setpoint);
    }

    /// Conversion complete event.
    pub fn irq_done(&self, c: &IrqCtx<'_>, b: &mut impl Board) {
        let state = self.state.borrow(c.cs());
        match state.get() {
            SeqState::AwaitSetpoint => {
                self.setpoint.store(b.adc_result(), Ordering::SeqCst);
                state.set(SeqState::AwaitTemperature);
                b.adc_start(AdcChannel::Temperature);
            }
            SeqState::AwaitTemperature => {
                self.temperature.store(b.adc_result(), Ordering::SeqCst);
                state.set(SeqState::Idle);
                // Both samples have landed. Wake the main loop.
                self.done.store(true, Ordering::SeqCst);
            }
            SeqState::Idle => {
                // Spurious completion. Nothing is waiting for it.
            }
        }
    }

    /// Take the finished measurement cycle, if any.
    ///
    /// Returns the raw setpoint and temperature samples exactly once
    /// per completed cycle.
    pub fn take_cycle(&self, _m: &MainCtx<'_>) -> Option<(u16, u16)> {
        if self.done.swap(false, Ordering::SeqCst) {
            Some((
                self.setpoint.load(Ordering::SeqCst),
                self.temperature.load(Ordering::SeqCst),
            ))
        } else {
            None
        }
    }
}

// vim: ts=4 sw=4 expandtab
