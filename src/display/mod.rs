//! The main API to the driver. A `Display` owns the chain, its configuration, and the column
//! buffer, and provides the bring-up sequence, whole-chain and per-module operations, and
//! drawing of static frames. Scrolling lives in the `scroll` module.

pub mod buffer;
pub mod scroll;

use log::debug;

use crate::chain::Chain;
use crate::command::consts::*;
use crate::command::Command;
use crate::config::{Config, ConfigError, Rotation};
use crate::display::buffer::{ColumnBuffer, MODULE_COLS};
use crate::font::GlyphSource;
use crate::interface::DisplayInterface;
use crate::orientation::{columns_to_matrix, matrix_to_columns, rotate, BitMatrix};
use crate::Error;

/// A driver for a chain of MAX7219 matrix modules.
///
/// Module indices taken by the per-module methods are logical chain positions: 0 is the module
/// farthest from the controller, which shows the rightmost 8 columns of the buffer's visible
/// window. When the configuration is `reversed`, logical positions are mirrored before they
/// reach the chain.
pub struct Display<DI>
where
    DI: DisplayInterface,
{
    chain: Chain<DI>,
    config: Config,
    buffer: ColumnBuffer,
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Construct a new driver for the chain connected to `iface`. Nothing is sent until
    /// `init` is called.
    pub fn new(iface: DI, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Display {
            chain: Chain::new(iface, config.num_modules),
            buffer: ColumnBuffer::new(config.num_modules),
            config,
        })
    }

    /// Bring up every chip in the chain and blank it. This must complete before anything is
    /// drawn; calling it again resets the chain and the buffer.
    pub fn init(&mut self) -> Result<(), Error<DI::Error>> {
        debug!(
            "init: {} modules, rotation {:?}, reversed {}",
            self.config.num_modules, self.config.rotation, self.config.reversed
        );
        self.buffer.clear();
        self.chain.send_to_all(Command::Shutdown(true))?;
        // Test, decode and scan limit are set before waking up so the chips never show
        // garbage.
        self.chain.send_to_all(Command::DisplayTest(false))?;
        self.chain.send_to_all(Command::DecodeMode(0))?;
        self.chain.send_to_all(Command::ScanLimit(DIGIT_MAX))?;
        self.chain
            .send_to_all(Command::Intensity(self.config.intensity))?;
        self.chain.send_to_all(Command::Shutdown(false))?;
        self.clear_all()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn num_modules(&self) -> usize {
        self.config.num_modules
    }

    /// The column buffer. Changes made through `buffer_mut` appear on the chain at the next
    /// `flush`.
    pub fn buffer(&self) -> &ColumnBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ColumnBuffer {
        &mut self.buffer
    }

    /// Turn off every LED on every module. The column buffer is left untouched.
    pub fn clear_all(&mut self) -> Result<(), Error<DI::Error>> {
        self.digits_to_all(0)
    }

    /// Turn on every LED on every module. The column buffer is left untouched.
    pub fn fill_all(&mut self) -> Result<(), Error<DI::Error>> {
        self.digits_to_all(0xFF)
    }

    /// Turn off every LED on one module.
    pub fn clear_for_one(&mut self, module: usize) -> Result<(), Error<DI::Error>> {
        self.digits_to_one(0, module)
    }

    /// Turn on every LED on one module.
    pub fn fill_for_one(&mut self, module: usize) -> Result<(), Error<DI::Error>> {
        self.digits_to_one(0xFF, module)
    }

    /// Set the intensity of every module, 0-15.
    pub fn brightness_all(&mut self, level: u8) -> Result<(), Error<DI::Error>> {
        self.chain.send_to_all(Command::Intensity(level))
    }

    /// Set the intensity of one module, 0-15.
    pub fn brightness_for_one(
        &mut self,
        level: u8,
        module: usize,
    ) -> Result<(), Error<DI::Error>> {
        let physical = self.config.physical_index(module);
        self.chain.send_to_one(Command::Intensity(level), physical)
    }

    /// Control shutdown mode on every module. The chips keep their register contents while
    /// shut down.
    pub fn shutdown(&mut self, enabled: bool) -> Result<(), Error<DI::Error>> {
        self.chain.send_to_all(Command::Shutdown(enabled))
    }

    /// Draw a matrix on one module, applying the configured rotation.
    pub fn draw_matrix(
        &mut self,
        matrix: &BitMatrix,
        module: usize,
    ) -> Result<(), Error<DI::Error>> {
        let physical = self.config.physical_index(module);
        let rotated = rotate(matrix, self.config.rotation);
        self.render_matrix(&rotated, physical)
    }

    /// Write a prepared matrix to the 8 digit registers of the chip at chain position
    /// `physical`, with no rotation or reordering.
    pub fn render_matrix(
        &mut self,
        matrix: &BitMatrix,
        physical: usize,
    ) -> Result<(), Error<DI::Error>> {
        for (digit, &col) in matrix_to_columns(matrix).iter().enumerate() {
            self.chain
                .send_to_one(Command::Digit(digit as u8, col), physical)?;
        }
        Ok(())
    }

    /// Write the visible window of the buffer to the chain.
    pub fn flush(&mut self) -> Result<(), Error<DI::Error>> {
        let n = self.config.num_modules;
        for segment in 0..n {
            let physical = self.config.physical_index(n - 1 - segment);
            let cols = self.buffer.segment(segment);
            if self.config.rotation == Rotation::None {
                for (digit, &col) in cols.iter().enumerate() {
                    self.chain
                        .send_to_one(Command::Digit(digit as u8, col), physical)?;
                }
            } else {
                let matrix = rotate(&columns_to_matrix(&cols), self.config.rotation);
                self.render_matrix(&matrix, physical)?;
            }
        }
        Ok(())
    }

    /// Draw text without scrolling. The first glyph starts `offset` columns right of the left
    /// edge of the visible window, and may be negative to show the tail of a longer string.
    /// When `clear` is set, the buffer and the chain are blanked first; otherwise the text is
    /// drawn over what the buffer already holds. Characters `font` cannot draw are skipped.
    pub fn display_text<F>(
        &mut self,
        text: &str,
        font: F,
        offset: isize,
        clear: bool,
    ) -> Result<(), Error<DI::Error>>
    where
        F: GlyphSource,
    {
        if clear {
            self.buffer.clear();
            self.clear_all()?;
        }
        let mut pos = offset + MODULE_COLS as isize;
        for glyph in text.chars().filter_map(|c| font.glyph(c)) {
            self.buffer.write_at(pos, glyph);
            pos += glyph.len() as isize;
            self.buffer.write_at(pos, &[0]);
            pos += 1;
        }
        self.flush()
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.chain.release()
    }

    fn digits_to_all(&mut self, data: u8) -> Result<(), Error<DI::Error>> {
        for digit in 0..NUM_DIGITS {
            self.chain.send_to_all(Command::Digit(digit, data))?;
        }
        Ok(())
    }

    fn digits_to_one(&mut self, data: u8, module: usize) -> Result<(), Error<DI::Error>> {
        let physical = self.config.physical_index(module);
        for digit in 0..NUM_DIGITS {
            self.chain
                .send_to_one(Command::Digit(digit, data), physical)?;
        }
        Ok(())
    }
}
