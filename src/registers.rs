//! BMP180 register map and command bytes.

/// Default 7-bit I²C address of the BMP180/BMP085.
pub const ADDRESS: u8 = 0x77;

/// Control register value that starts a temperature conversion.
pub const COMMAND_TEMPERATURE: u8 = 0x2E;

/// Conversion time of a temperature measurement, rounded up.
pub const TEMPERATURE_DELAY_MS: u8 = 5;

/// Registers touched by the driver.
///
/// The calibration EEPROM is eleven big-endian words starting at 0xAA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Ac1 = 0xAA,
    Ac2 = 0xAC,
    Ac3 = 0xAE,
    Ac4 = 0xB0,
    Ac5 = 0xB2,
    Ac6 = 0xB4,
    B1 = 0xB6,
    B2 = 0xB8,
    Mb = 0xBA,
    Mc = 0xBC,
    Md = 0xBE,
    /// Measurement control
    Control = 0xF4,
    /// MSB of the conversion result, followed by LSB (0xF7) and XLSB (0xF8)
    Data = 0xF6,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }
}
