//! Control core for a zero-crossing synchronized AC resistive heater.
//!
//! The heater power switch is driven with a slow PWM waveform (0.5 Hz
//! carrier). The duty cycle follows a potentiometer setpoint and is
//! throttled by a thermal interlock. The logical on/off decision and the
//! physical switch transition are decoupled: the pin is only ever changed
//! inside the zero-cross edge handler, so the switch element always
//! commutates at zero line voltage.
//!
//! This crate is the hardware independent core. The integrating firmware
//! implements [`Board`] on top of its peripherals, constructs a
//! `static SYSTEM: System = System::new()`, calls [`System::init`] once and
//! then forwards its interrupt vectors to the `irq_*` entry points of
//! [`System`]. The main loop calls [`System::run`] once per wakeup and
//! sleeps when it returns `false`.

#![no_std]

pub mod analog;
pub mod debug;
pub mod gate;
pub mod hw;
pub mod mutex;
pub mod system;
pub mod temp;
pub mod timer;

pub use crate::{
    analog::AdcChannel,
    hw::Board,
    mutex::{IrqCtx, MainCtx},
    system::System,
};

// vim: ts=4 sw=4 expandtab
