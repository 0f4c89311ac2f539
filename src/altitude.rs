//! Barometric altitude formulas.

use libm::pow;

const SCALE_HEIGHT_M: f64 = 44330.0;
const EXPONENT: f64 = 5.255;

/// Converts absolute `pressure` (mbar) measured at `altitude` meters into the
/// equivalent sea-level pressure (mbar), as published in weather data.
pub fn sea_level(pressure: f64, altitude: f64) -> f64 {
    pressure / pow(1.0 - altitude / SCALE_HEIGHT_M, EXPONENT)
}

/// Returns the altitude in meters of `pressure` above the point where
/// `baseline` was measured. Both pressures in mbar; the result is negative
/// below the baseline.
pub fn altitude(pressure: f64, baseline: f64) -> f64 {
    SCALE_HEIGHT_M * (1.0 - pow(pressure / baseline, 1.0 / EXPONENT))
}
