//! The command set for the MAX7219.
//!
//! Every command is a 16-bit word shifted into the chip MSB first: the high byte selects a
//! register and the low byte is the data written to it. In a daisy chain, each word shifted into
//! the first chip pushes the previous word out of its DOUT pin into the next chip, so a frame
//! for an N-module chain is always exactly N words long.

/// Register addresses.
pub mod consts {
    pub const NOOP: u8 = 0x00;
    pub const DIGIT0: u8 = 0x01;
    pub const DIGIT7: u8 = 0x08;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;

    /// Number of digit registers, i.e. LED columns driven by one chip.
    pub const NUM_DIGITS: u8 = 8;
    pub const DIGIT_MAX: u8 = NUM_DIGITS - 1;
    pub const INTENSITY_MAX: u8 = 15;
}

use self::consts::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave the chip state untouched. Used to pad frames addressed to other chips in the chain.
    NoOp,
    /// Write the 8 LEDs of one column. The digit index ranges 0-7; bit `r` of the data byte
    /// lights row `r`.
    Digit(u8, u8),
    /// Select BCD decoding per digit. Only useful for 7-segment displays, so matrices always use
    /// 0 (no decode).
    DecodeMode(u8),
    /// Set the LED current duty cycle. Range 0 (1/32) to 15 (31/32).
    Intensity(u8),
    /// Set how many digits are scanned, counting from digit 0. Range 0-7, where 7 scans all
    /// eight columns.
    ScanLimit(u8),
    /// Control shutdown mode. `true` blanks the display and stops the scan oscillator, `false`
    /// resumes normal operation. Register contents survive shutdown.
    Shutdown(bool),
    /// Control display test mode, which lights every LED at full intensity regardless of the
    /// digit registers.
    DisplayTest(bool),
}

impl Command {
    /// Encode the command as a `[register, data]` pair, or `Err(())` if an argument is out of
    /// range for its register.
    pub fn encode(self) -> Result<[u8; 2], ()> {
        match self {
            Command::NoOp => Ok([NOOP, 0]),
            Command::Digit(digit, data) => match digit {
                0..=DIGIT_MAX => Ok([DIGIT0 + digit, data]),
                _ => Err(()),
            },
            Command::DecodeMode(mask) => Ok([DECODE_MODE, mask]),
            Command::Intensity(level) => match level {
                0..=INTENSITY_MAX => Ok([INTENSITY, level]),
                _ => Err(()),
            },
            Command::ScanLimit(limit) => match limit {
                0..=DIGIT_MAX => Ok([SCAN_LIMIT, limit]),
                _ => Err(()),
            },
            Command::Shutdown(shutdown) => Ok([SHUTDOWN, if shutdown { 0 } else { 1 }]),
            Command::DisplayTest(ena) => Ok([DISPLAY_TEST, ena as u8]),
        }
    }
}
