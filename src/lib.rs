//! Driver library for chains of MAX7219 LED matrix modules, with a column buffer for drawing
//! static frames and scrolling text across the whole chain.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate embedded_hal as hal;

use core::fmt;


pub mod chain;
pub mod command;
pub mod config;
pub mod display;
pub mod font;
pub mod interface;
pub mod orientation;

// Re-exports for primary API.
pub use chain::Chain;
pub use command::Command;
pub use config::{Config, ConfigError, Rotation};
pub use display::scroll::{Scroll, ScrollEnd, ScrollState};
pub use display::Display;
pub use font::{GlyphSource, StandardFont};
pub use interface::spi::SpiInterface;
pub use orientation::BitMatrix;

/// An error while driving the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The interface failed. The frame in flight is lost and the chip registers it addressed are
    /// in an unknown state.
    Interface(E),
    /// A command argument or module index was out of range.
    OutOfRange,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Interface(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "interface error: {:?}", e),
            Error::OutOfRange => write!(f, "argument out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
