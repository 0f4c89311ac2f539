//! A platform agnostic driver for the Bosch BMP180 (and BMP085) barometric
//! pressure sensor, built on the [`embedded-hal`] blocking I²C traits.
//!
//! Conversions use floating-point polynomials derived once from the factory
//! calibration, giving temperature in °C and pressure in mbar.
//!
//! Measurements follow the sensor's two phases: a `start_*` call triggers the
//! conversion and returns how many milliseconds to wait, the matching `read_*`
//! call fetches and converts the result. [`BMP180::temperature_and_pressure`]
//! runs a whole cycle with a blocking delay instead.
//!
//! ```no_run
//! # extern crate bmp180;
//! # extern crate embedded_hal_mock;
//! # use embedded_hal_mock::i2c::Mock as I2cMock;
//! # use embedded_hal_mock::delay::MockNoop as Delay;
//! use bmp180::{altitude, sea_level, Oversampling, BMP180};
//! # let i2c = I2cMock::new(&[]);
//!
//! let mut bmp180 = BMP180::new(i2c);
//! bmp180.initialize().unwrap();
//!
//! let m = bmp180
//!     .temperature_and_pressure(&mut Delay, Oversampling::O8)
//!     .unwrap();
//! let p0 = sea_level(m.pressure, 1655.0);
//! let height = altitude(m.pressure, p0);
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2

#![no_std]

extern crate byteorder;
extern crate embedded_hal as hal;
extern crate libm;
#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate std;
#[cfg(test)]
extern crate embedded_hal_mock;

mod altitude;
mod calibration;
mod error;
mod registers;

use byteorder::{BigEndian, ByteOrder};
use hal::blocking::delay::DelayMs;
use hal::blocking::i2c::{Write, WriteRead};

pub use altitude::{altitude, sea_level};
pub use calibration::{Calibration, RawCalibration};
pub use error::{Conversion, Error};
pub use registers::ADDRESS;

use registers::{Register, COMMAND_TEMPERATURE, TEMPERATURE_DELAY_MS};

/// Pressure oversampling setting (`oss` in the datasheet).
///
/// More samples lower the noise and lengthen the conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oversampling {
    /// Ultra low power, one sample
    O1,
    /// Standard, two samples
    O2,
    /// High resolution, four samples
    O4,
    /// Ultra high resolution, eight samples
    O8,
}

impl Oversampling {
    /// Value written to the control register to start the conversion.
    pub fn command(self) -> u8 {
        match self {
            Oversampling::O1 => 0x34,
            Oversampling::O2 => 0x74,
            Oversampling::O4 => 0xB4,
            Oversampling::O8 => 0xF4,
        }
    }

    /// Maximum conversion time in milliseconds, rounded up.
    pub fn conversion_time_ms(self) -> u8 {
        match self {
            Oversampling::O1 => 5,
            Oversampling::O2 => 8,
            Oversampling::O4 => 14,
            Oversampling::O8 => 26,
        }
    }
}

impl Default for Oversampling {
    fn default() -> Self {
        Oversampling::O1
    }
}

/// Maps the datasheet `oss` level 0..=3. Anything else falls back to level 0.
impl From<u8> for Oversampling {
    fn from(level: u8) -> Self {
        match level {
            1 => Oversampling::O2,
            2 => Oversampling::O4,
            3 => Oversampling::O8,
            _ => Oversampling::O1,
        }
    }
}

/// Result of a full temperature and pressure cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// °C
    pub temperature: f64,
    /// Absolute pressure in mbar
    pub pressure: f64,
}

impl Measurement {
    /// Sea-level pressure for a sensor located at `altitude` meters.
    pub fn sea_level(&self, altitude: f64) -> f64 {
        sea_level(self.pressure, altitude)
    }

    /// Altitude in meters above the point where `baseline` mbar was measured.
    pub fn altitude(&self, baseline: f64) -> f64 {
        altitude(self.pressure, baseline)
    }
}

/// BMP180 driver. Owns the I²C bus handle.
pub struct BMP180<I2C> {
    i2c: I2C,
    address: u8,
    calibration: Option<Calibration>,
}

/// The BMP085 is register compatible with the BMP180.
pub type BMP085<I2C> = BMP180<I2C>;

impl<I2C> BMP180<I2C> {
    /// Creates a driver for a sensor at the default address. Call
    /// [`initialize`](#method.initialize) before taking measurements.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, ADDRESS)
    }

    /// Creates a driver for a sensor at a non-default 7-bit `address`.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        BMP180 {
            i2c,
            address,
            calibration: None,
        }
    }

    /// 7-bit I²C address the driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// `true` once the calibration has been read successfully.
    pub fn is_initialized(&self) -> bool {
        self.calibration.is_some()
    }

    /// Derived coefficients, once `initialize` has succeeded.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Destroys the driver and gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> BMP180<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Reads the factory calibration and derives the conversion coefficients.
    ///
    /// Any failed read aborts with the bus error and leaves the driver
    /// uninitialized. Once initialized, further calls do nothing.
    pub fn initialize(&mut self) -> Result<(), Error<E>> {
        if self.calibration.is_some() {
            return Ok(());
        }

        let raw = self.read_calibration()?;
        debug!("bmp180: calibration {:?}", raw);

        let calibration = Calibration::from_raw(&raw);
        trace!("bmp180: coefficients {:?}", calibration);
        self.calibration = Some(calibration);

        Ok(())
    }

    /// Reads the eleven calibration words, in register order.
    pub fn read_calibration(&mut self) -> Result<RawCalibration, Error<E>> {
        Ok(RawCalibration {
            ac1: self.read_i16(Register::Ac1)?,
            ac2: self.read_i16(Register::Ac2)?,
            ac3: self.read_i16(Register::Ac3)?,
            ac4: self.read_u16(Register::Ac4)?,
            ac5: self.read_u16(Register::Ac5)?,
            ac6: self.read_u16(Register::Ac6)?,
            b1: self.read_i16(Register::B1)?,
            b2: self.read_i16(Register::B2)?,
            mb: self.read_i16(Register::Mb)?,
            mc: self.read_i16(Register::Mc)?,
            md: self.read_i16(Register::Md)?,
        })
    }

    /// Starts a temperature conversion. Returns the number of milliseconds
    /// to wait before [`read_temperature`](#method.read_temperature).
    pub fn start_temperature(&mut self) -> Result<u8, Error<E>> {
        debug!("bmp180: start temperature");
        self.write_register(Register::Control, COMMAND_TEMPERATURE)?;

        Ok(TEMPERATURE_DELAY_MS)
    }

    /// Fetches the result of the last temperature conversion, in °C.
    pub fn read_temperature(&mut self) -> Result<f64, Error<E>> {
        let calibration = self.calibration.ok_or(Error::Uninitialized)?;

        let mut buf = [0u8; 2];
        self.read_register(Register::Data, &mut buf)?;
        let tu = f64::from(BigEndian::read_u16(&buf));
        trace!("bmp180: tu = {}", tu);

        calibration.temperature(tu).map_err(degenerate)
    }

    /// Starts a pressure conversion. Returns the number of milliseconds to
    /// wait before [`read_pressure`](#method.read_pressure).
    pub fn start_pressure(&mut self, oss: Oversampling) -> Result<u8, Error<E>> {
        debug!("bmp180: start pressure {:?}", oss);
        self.write_register(Register::Control, oss.command())?;

        Ok(oss.conversion_time_ms())
    }

    /// Fetches the result of the last pressure conversion as absolute
    /// pressure in mbar.
    ///
    /// `temperature` is a recent reading from
    /// [`read_temperature`](#method.read_temperature); one temperature can
    /// serve several pressure readings while it is stable. A NaN or infinite
    /// `temperature` fails with `Error::Degenerate`.
    pub fn read_pressure(&mut self, temperature: f64) -> Result<f64, Error<E>> {
        let calibration = self.calibration.ok_or(Error::Uninitialized)?;

        let mut buf = [0u8; 3];
        self.read_register(Register::Data, &mut buf)?;
        let pu = f64::from(BigEndian::read_u16(&buf[..2])) + f64::from(buf[2]) / 256.0;
        trace!("bmp180: pu = {}", pu);

        calibration.pressure(pu, temperature).map_err(degenerate)
    }

    /// Measures the temperature, blocking on `delay` for the conversion.
    pub fn temperature<D: DelayMs<u8>>(&mut self, delay: &mut D) -> Result<f64, Error<E>> {
        if self.calibration.is_none() {
            return Err(Error::Uninitialized);
        }

        let wait = self.start_temperature()?;
        delay.delay_ms(wait);
        self.read_temperature()
    }

    /// Runs a full temperature then pressure cycle, blocking on `delay`.
    pub fn temperature_and_pressure<D: DelayMs<u8>>(
        &mut self,
        delay: &mut D,
        oss: Oversampling,
    ) -> Result<Measurement, Error<E>> {
        let temperature = self.temperature(delay)?;

        let wait = self.start_pressure(oss)?;
        delay.delay_ms(wait);
        let pressure = self.read_pressure(temperature)?;

        Ok(Measurement {
            temperature,
            pressure,
        })
    }

    fn read_i16(&mut self, reg: Register) -> Result<i16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_register(reg, &mut buf)?;
        Ok(BigEndian::read_i16(&buf))
    }

    fn read_u16(&mut self, reg: Register) -> Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_register(reg, &mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }

    fn read_register(&mut self, reg: Register, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c.write_read(self.address, &[reg.addr()], buf)?;
        Ok(())
    }

    fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<E>> {
        self.i2c.write(self.address, &[reg.addr(), value])?;
        Ok(())
    }
}

fn degenerate<E>(conversion: Conversion) -> Error<E> {
    warn!("bmp180: {:?} conversion has no finite value", conversion);
    Error::Degenerate(conversion)
}
