//! Hardware interface boundary.
//!
//! Everything the control core needs from the hardware goes through the
//! [`Board`] trait. The integrating firmware implements it on top of its
//! MCU peripherals and forwards the interrupt vectors of the carrier
//! timer, the converter and the zero-cross input to the `irq_*` entry
//! points of [`System`](crate::system::System).

use crate::analog::AdcChannel;

pub trait Board {
    /// Drive the power switch gate output pin.
    ///
    /// Called exclusively from the zero-cross edge handler. No other
    /// path in the core touches the physical output.
    fn set_gate(&mut self, on: bool);

    /// Select `chan` on the converter mux, switch to the reference
    /// source that channel requires and start a single conversion.
    ///
    /// [`AdcChannel::Setpoint`] is measured against the supply rail,
    /// [`AdcChannel::Temperature`] against the internal reference.
    /// Completion is reported through
    /// [`System::irq_adc_done`](crate::system::System::irq_adc_done).
    fn adc_start(&mut self, chan: AdcChannel);

    /// Read the result of the completed conversion. 10 bit, 0..=1023.
    fn adc_result(&mut self) -> u16;

    /// Program the carrier compare threshold, in carrier timer ticks.
    /// See [`PERIOD_TICKS`](crate::timer::PERIOD_TICKS).
    fn set_pwm_compare(&mut self, ticks: u16);

    /// Clear the pending edge indication of the zero-cross input.
    fn ack_zero_cross(&mut self);

    /// Reload the liveness watchdog.
    ///
    /// The watchdog is the only fault recovery path: if the main loop
    /// does not get here within one carrier period's worth of wall
    /// time, the hardware must reset the whole system. Size the
    /// timeout to a bit more than one carrier period.
    fn wdt_poke(&mut self);

    /// Factory programmed converter code of the temperature sensor at
    /// the 30 degC reference point. Fixed for the device lifetime.
    fn temp_cal_30c(&self) -> u16;
}

// vim: ts=4 sw=4 expandtab
