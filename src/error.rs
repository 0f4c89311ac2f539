use core::fmt;

/// Which conversion formula hit a zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `a + md` in the temperature polynomial
    Temperature,
    /// `y` in the pressure polynomial
    Pressure,
}

/// Errors returned by the driver, generic over the bus error `E`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error<E> {
    /// The I²C transaction failed (NACK, arbitration loss, HAL timeout, ...)
    I2c(E),
    /// A measurement was read before `initialize()` succeeded
    Uninitialized,
    /// The calibration polynomial has no finite value for these inputs: a zero
    /// denominator, or a non-finite temperature passed to the pressure formula
    Degenerate(Conversion),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::I2c(ref e) => write!(f, "I2C bus error: {:?}", e),
            Error::Uninitialized => f.write_str("calibration data has not been read"),
            Error::Degenerate(Conversion::Temperature) => {
                f.write_str("temperature conversion is undefined")
            }
            Error::Degenerate(Conversion::Pressure) => {
                f.write_str("pressure conversion is undefined")
            }
        }
    }
}
