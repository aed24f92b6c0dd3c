//! Temperature conversion and filtering.

use crate::mutex::{MainCtx, MutexCell};

/// Full scale of the 10 bit converter.
const ADC_FULL_SCALE: i32 = 1024;

/// Sensor reference voltage, in millivolts.
const REF_MILLIVOLTS: i32 = 1500;

/// Sensor slope: 3.55 mV per degC, scaled by 100.
const SLOPE_MILLIVOLTS_X100: i32 = 355;

/// Temperature at the factory calibration point.
const CAL_DEGC: i16 = 30;

/// Convert a raw converter code to degrees Celsius.
///
/// Linear transfer referenced to the factory calibration code taken at
/// 30 degC. Truncates toward zero.
pub fn adc_to_degc(raw: u16, cal_30c: u16) -> i16 {
    let diff = raw as i32 - cal_30c as i32;
    let degc = diff * REF_MILLIVOLTS * 100 / (ADC_FULL_SCALE * SLOPE_MILLIVOLTS_X100);
    CAL_DEGC + degc as i16
}

/// Minimum drop that a falling reading must have to be accepted.
pub const FALL_THRES_DEGC: i16 = 2;

/// Falling hysteresis filter for the measured temperature.
///
/// A rising reading is taken over immediately. A falling reading is
/// ignored until it has dropped at least [`FALL_THRES_DEGC`] below the
/// current filter value. This keeps the overheat limit from chattering
/// on a noisy falling signal.
pub struct TempFilter {
    degc: MutexCell<i16>,
}

impl TempFilter {
    pub const fn new() -> Self {
        Self {
            degc: MutexCell::new(0),
        }
    }

    /// Feed one measurement. Returns the new filter value.
    pub fn run(&self, m: &MainCtx<'_>, degc: i16) -> i16 {
        let prev = self.degc.get(m);
        if degc > prev || prev - degc >= FALL_THRES_DEGC {
            self.degc.set(m, degc);
            degc
        } else {
            prev
        }
    }

    pub fn get(&self, m: &MainCtx<'_>) -> i16 {
        self.degc.get(m)
    }
}


// vim: ts=4 sw=4 expandtab
