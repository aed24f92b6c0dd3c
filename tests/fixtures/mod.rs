//! Test fixtures: a simulated board for driving the control core
//! without hardware.

#![allow(dead_code)]

use heatctl::{AdcChannel, Board, IrqCtx, MainCtx, System};

/// Liveness watchdog timeout of the simulated board, in carrier timer
/// ticks. 3.2 s against the 2 s carrier period.
pub const WDT_TIMEOUT_TICKS: u32 = 32_000;

/// A board whose hardware effects are recorded for assertions.
pub struct SimBoard {
    /// Sample the converter will deliver per channel.
    pub setpoint_sample: u16,
    pub temp_sample: u16,
    /// Channel of the conversion in flight.
    pub converting: Option<AdcChannel>,
    /// Conversion start order.
    pub conversions: Vec<AdcChannel>,
    /// Gate pin level and its transition log.
    pub gate: bool,
    pub gate_transitions: Vec<bool>,
    /// Programmed compare threshold and the write log.
    pub compare: u16,
    pub compare_writes: Vec<u16>,
    /// Acknowledged zero-cross edges.
    pub zc_acks: u32,
    /// Liveness watchdog countdown.
    pub wdt_left: u32,
    pub wdt_reset_fired: bool,
    /// Factory calibration code at 30 degC.
    pub cal_30c: u16,
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            setpoint_sample: 0,
            temp_sample: 0,
            converting: None,
            conversions: Vec::new(),
            gate: false,
            gate_transitions: Vec::new(),
            compare: 0,
            compare_writes: Vec::new(),
            zc_acks: 0,
            wdt_left: WDT_TIMEOUT_TICKS,
            wdt_reset_fired: false,
            cal_30c: 673,
        }
    }

    /// Let simulated wall time pass without any controller activity.
    pub fn elapse(&mut self, ticks: u32) {
        if self.wdt_reset_fired {
            return;
        }
        if self.wdt_left <= ticks {
            self.wdt_left = 0;
            self.wdt_reset_fired = true;
        } else {
            self.wdt_left -= ticks;
        }
    }
}

impl Board for SimBoard {
    fn set_gate(&mut self, on: bool) {
        if on != self.gate {
            self.gate = on;
            self.gate_transitions.push(on);
        }
    }

    fn adc_start(&mut self, chan: AdcChannel) {
        self.converting = Some(chan);
        self.conversions.push(chan);
    }

    fn adc_result(&mut self) -> u16 {
        match self.converting.take() {
            Some(AdcChannel::Setpoint) => self.setpoint_sample,
            Some(AdcChannel::Temperature) => self.temp_sample,
            None => 0,
        }
    }

    fn set_pwm_compare(&mut self, ticks: u16) {
        self.compare = ticks;
        self.compare_writes.push(ticks);
    }

    fn ack_zero_cross(&mut self) {
        self.zc_acks += 1;
    }

    fn wdt_poke(&mut self) {
        self.wdt_left = WDT_TIMEOUT_TICKS;
    }

    fn temp_cal_30c(&self) -> u16 {
        self.cal_30c
    }
}

/// Run `f` in main loop context.
pub fn with_main<R>(f: impl FnOnce(&MainCtx<'_>) -> R) -> R {
    // SAFETY: Tests are single threaded and have no interrupt context.
    let m = unsafe { MainCtx::new() };
    f(&m)
}

/// Run `f` in interrupt context.
pub fn with_irq<R>(f: impl FnOnce(&IrqCtx<'_>) -> R) -> R {
    // SAFETY: Tests are single threaded and have no interrupt context.
    let c = unsafe { IrqCtx::new() };
    f(&c)
}

/// Sink for the diagnostic stream.
pub type Console = heapless::String<128>;

/// Drive one full carrier period: period interrupt, both conversions,
/// then the woken main loop body. Returns the diagnostic line.
pub fn run_cycle(sys: &System, b: &mut SimBoard, pot: u16, temp: u16) -> String {
    b.setpoint_sample = pot;
    b.temp_sample = temp;
    with_irq(|c| sys.irq_timer_period(c, b));
    with_irq(|c| sys.irq_adc_done(c, b));
    with_irq(|c| sys.irq_adc_done(c, b));

    let mut con = Console::new();
    let processed = with_main(|m| sys.run(m, b, &mut con));
    assert!(processed);
    con.as_str().to_owned()
}
