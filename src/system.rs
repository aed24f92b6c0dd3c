//! Top level heater control system.
//!
//! [`System`] owns all components and is the single object the
//! integrating firmware talks to: the interrupt vectors call the
//! `irq_*` entry points, the main loop calls [`System::run`] once per
//! wakeup and sleeps when it returns `false`.

use crate::{
    analog::Adc,
    debug::{self, CycleLog},
    gate::Gate,
    hw::Board,
    mutex::{IrqCtx, MainCtx, MutexCell},
    temp::{self, TempFilter},
    timer::Pwm,
};
use ufmt::uWrite;

/// Raw setpoint readings below this count as zero demand.
const SETPOINT_DEADBAND: u16 = 20;

/// Raw setpoint readings are clamped to this ceiling.
const SETPOINT_MAX: u16 = 1000;

/// Filtered temperature above which the overheat limit engages.
const OVERHEAT_DEGC: i16 = 40;

/// Duty ceiling while the overheat limit is engaged.
///
/// The limit throttles to 10 % instead of cutting to zero. The
/// residual duty keeps the limit from oscillating across the
/// temperature threshold.
const OVERHEAT_DUTY: u8 = 10;

/// A duty request must differ from the committed one by more than this
/// to be committed. Suppresses chatter from converter noise.
const DUTY_COMMIT_THRES: u8 = 2;

/// Map a raw setpoint reading to a duty cycle percentage.
fn setpoint_to_duty(raw: u16) -> u8 {
    let clamped = if raw < SETPOINT_DEADBAND {
        0
    } else {
        raw.min(SETPOINT_MAX)
    };
    (clamped / 10) as u8
}

/// Overheat interlock. Throttles the requested duty while the filtered
/// temperature is too high. Returns the effective duty and whether the
/// limit engaged.
fn overheat_limit(duty: u8, filt_degc: i16) -> (u8, bool) {
    if duty > OVERHEAT_DUTY && filt_degc > OVERHEAT_DEGC {
        (OVERHEAT_DUTY, true)
    } else {
        (duty, false)
    }
}

pub struct System {
    pwm: Pwm,
    adc: Adc,
    gate: Gate,
    temp_filter: TempFilter,
    temp_cal: MutexCell<u16>,
    prev_duty: MutexCell<u8>,
}

impl System {
    pub const fn new() -> Self {
        Self {
            pwm: Pwm::new(),
            adc: Adc::new(),
            gate: Gate::new(),
            temp_filter: TempFilter::new(),
            temp_cal: MutexCell::new(0),
            prev_duty: MutexCell::new(0),
        }
    }

    /// One time startup.
    ///
    /// Caches the factory calibration constant for the lifetime of the
    /// device and brings the compare register in line with the cold
    /// default duty of zero.
    pub fn init(&self, m: &MainCtx<'_>, b: &mut impl Board) {
        self.temp_cal.set(m, b.temp_cal_30c());
        b.set_pwm_compare(0);
    }

    /// Carrier period start interrupt.
    ///
    /// Latches a pending duty change, pends the period-start gate level
    /// and starts a new measurement cycle.
    pub fn irq_timer_period(&self, c: &IrqCtx<'_>, b: &mut impl Board) {
        let on = self.pwm.irq_period(c, b);
        self.gate.pend(c, on);
        self.adc.start_cycle(c, b);
    }

    /// Duty compare match interrupt. The logical on time of the running
    /// period is over.
    pub fn irq_timer_compare(&self, c: &IrqCtx<'_>) {
        self.gate.pend(c, false);
    }

    /// Converter conversion complete interrupt.
    pub fn irq_adc_done(&self, c: &IrqCtx<'_>, b: &mut impl Board) {
        self.adc.irq_done(c, b);
    }

    /// Zero-cross edge interrupt.
    pub fn irq_zero_cross(&self, c: &IrqCtx<'_>, b: &mut impl Board) {
        self.gate.irq_zero_cross(c, b);
    }

    /// Main loop body. Call once per wakeup.
    ///
    /// Runs one control computation if a measurement cycle has
    /// completed and re-arms the liveness watchdog afterwards. Returns
    /// whether a cycle was processed; on `false` the caller goes back
    /// to sleep.
    pub fn run<B: Board, W: uWrite>(&self, m: &MainCtx<'_>, b: &mut B, con: &mut W) -> bool {
        let Some((setpoint_raw, temp_raw)) = self.adc.take_cycle(m) else {
            return false;
        };

        let degc = temp::adc_to_degc(temp_raw, self.temp_cal.get(m));
        let filt_degc = self.temp_filter.run(m, degc);

        let duty = setpoint_to_duty(setpoint_raw);
        let (duty, overheat) = overheat_limit(duty, filt_degc);

        let _ = debug::log_cycle(
            con,
            &CycleLog {
                setpoint_raw,
                degc,
                filt_degc,
                overheat,
                duty,
            },
        );

        let prev = self.prev_duty.get(m);
        if duty.abs_diff(prev) > DUTY_COMMIT_THRES {
            self.prev_duty.set(m, duty);
            self.pwm.set_duty(m, duty);
        }

        b.wdt_poke();
        true
    }

    /// Level the power switch pin is currently driven to.
    pub fn gate_is_on(&self) -> bool {
        self.gate.is_on()
    }
}


// vim: ts=4 sw=4 expandtab
