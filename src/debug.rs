//! Line oriented diagnostic output.
//!
//! One status line per control cycle, for a human at a serial console:
//!
//! ```text
//! adc 512 degc 41 filtdegc 41 overheat pwm 10 %
//! ```
//!
//! Nothing in the control core depends on this stream; write errors are
//! discarded by the caller.

use ufmt::{uWrite, uwrite};

/// Data of one completed control cycle.
pub struct CycleLog {
    pub setpoint_raw: u16,
    pub degc: i16,
    pub filt_degc: i16,
    pub overheat: bool,
    pub duty: u8,
}

/// Emit the status line for a completed control cycle.
pub fn log_cycle<W: uWrite>(con: &mut W, log: &CycleLog) -> Result<(), W::Error> {
    uwrite!(
        con,
        "adc {} degc {} filtdegc {} ",
        log.setpoint_raw,
        log.degc,
        log.filt_degc
    )?;
    if log.overheat {
        uwrite!(con, "overheat ")?;
    }
    uwrite!(con, "pwm {} %\r\n", log.duty)
}

/// Boot banner, emitted once after reset.
pub fn log_start<W: uWrite>(con: &mut W) -> Result<(), W::Error> {
    uwrite!(con, "Start\r\n")
}

// vim: ts=4 sw=4 expandtab
