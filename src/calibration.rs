//! Factory calibration and the floating-point compensation polynomials.
//!
//! The BMP180 stores eleven calibration words in its EEPROM. Instead of the
//! integer algorithm from the datasheet, the words are turned once into a set
//! of floating-point polynomial coefficients which then convert raw ADC counts
//! into °C and mbar.

use libm::pow;

use error::Conversion;

/// The eleven calibration words as stored in the sensor EEPROM (0xAA..=0xBE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCalibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

/// Polynomial coefficients derived from a [`RawCalibration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub c5: f64,
    pub c6: f64,
    pub mc: f64,
    pub md: f64,
    pub x0: f64,
    pub x1: f64,
    pub x2: f64,
    pub y0: f64,
    pub y1: f64,
    pub y2: f64,
    pub p0: f64,
    pub p1: f64,
    pub p2: f64,
}

impl Calibration {
    /// Derives the coefficients. The arithmetic is done in `f64` with the
    /// same constants the reference formulas use, so results are reproducible.
    pub fn from_raw(raw: &RawCalibration) -> Self {
        let c3 = 160.0 * pow(2.0, -15.0) * f64::from(raw.ac3);
        let c4 = pow(10.0, -3.0) * pow(2.0, -15.0) * f64::from(raw.ac4);
        let b1 = pow(160.0, 2.0) * pow(2.0, -30.0) * f64::from(raw.b1);

        Calibration {
            c5: (pow(2.0, -15.0) / 160.0) * f64::from(raw.ac5),
            c6: f64::from(raw.ac6),
            mc: (pow(2.0, 11.0) / pow(160.0, 2.0)) * f64::from(raw.mc),
            md: f64::from(raw.md) / 160.0,
            x0: f64::from(raw.ac1),
            x1: 160.0 * pow(2.0, -13.0) * f64::from(raw.ac2),
            x2: pow(160.0, 2.0) * pow(2.0, -25.0) * f64::from(raw.b2),
            y0: c4 * pow(2.0, 15.0),
            y1: c4 * c3,
            y2: c4 * b1,
            p0: (3791.0 - 8.0) / 1600.0,
            p1: 1.0 - 7357.0 * pow(2.0, -20.0),
            p2: 3038.0 * 100.0 * pow(2.0, -36.0),
        }
    }

    /// Converts the raw temperature count `tu` into °C.
    pub fn temperature(&self, tu: f64) -> Result<f64, Conversion> {
        let a = self.c5 * (tu - self.c6);
        let denominator = a + self.md;
        if denominator == 0.0 {
            return Err(Conversion::Temperature);
        }

        finite(a + self.mc / denominator, Conversion::Temperature)
    }

    /// Converts the raw pressure count `pu` into absolute pressure in mbar.
    ///
    /// `temperature` must come from a measurement taken shortly before the
    /// pressure conversion. A NaN or infinite `temperature` is rejected.
    pub fn pressure(&self, pu: f64, temperature: f64) -> Result<f64, Conversion> {
        if !temperature.is_finite() {
            return Err(Conversion::Pressure);
        }

        let s = temperature - 25.0;
        let x = self.x2 * pow(s, 2.0) + self.x1 * s + self.x0;
        let y = self.y2 * pow(s, 2.0) + self.y1 * s + self.y0;
        if y == 0.0 {
            return Err(Conversion::Pressure);
        }
        let z = (pu - x) / y;

        finite(self.p2 * pow(z, 2.0) + self.p1 * z + self.p0, Conversion::Pressure)
    }
}

fn finite(value: f64, conversion: Conversion) -> Result<f64, Conversion> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(conversion)
    }
}
