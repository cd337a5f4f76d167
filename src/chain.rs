//! Addressing of individual chips in a daisy chain.
//!
//! The chips form one long shift register, so there is no way to talk to a single chip alone.
//! Every frame shifts exactly one command word per chip and then latches all of them at once.
//! Chips that should be left alone receive a no-op word.

use crate::command::Command;
use crate::interface::DisplayInterface;
use crate::Error;

/// The chip addressing layer: owns the interface and knows the length of the chain.
pub struct Chain<DI> {
    iface: DI,
    num_modules: usize,
}

impl<DI> Chain<DI>
where
    DI: DisplayInterface,
{
    /// Wrap an interface connected to a chain of `num_modules` chips.
    pub fn new(iface: DI, num_modules: usize) -> Self {
        Chain { iface, num_modules }
    }

    pub fn num_modules(&self) -> usize {
        self.num_modules
    }

    /// Send the same command to every chip in the chain.
    pub fn send_to_all(&mut self, cmd: Command) -> Result<(), Error<DI::Error>> {
        let word = cmd.encode().map_err(|_| Error::OutOfRange)?;
        self.frame(|_| word)
    }

    /// Send a command to the chip at chain position `index`, where position 0 is the chip
    /// farthest from the controller. Every other chip receives a no-op. An `index` past the end
    /// of the chain still shifts a full frame, in which every word is a no-op.
    pub fn send_to_one(&mut self, cmd: Command, index: usize) -> Result<(), Error<DI::Error>> {
        let word = cmd.encode().map_err(|_| Error::OutOfRange)?;
        let noop = [0u8; 2];
        self.frame(|i| if i == index { word } else { noop })
    }

    /// Shift one word per chip, framed by a single select/latch pair. `word_for` receives the
    /// chain position the word will end up in.
    fn frame<F>(&mut self, word_for: F) -> Result<(), Error<DI::Error>>
    where
        F: Fn(usize) -> [u8; 2],
    {
        self.iface.select()?;
        for i in 0..self.num_modules {
            self.iface.write(&word_for(i))?;
        }
        self.iface.latch()?;
        Ok(())
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::{Sent, TestSpyInterface};

    #[test]
    fn send_to_all_floods_every_chip() {
        for n in 1..=8 {
            let di = TestSpyInterface::new();
            let mut chain = Chain::new(di.split(), n);
            chain.send_to_all(Command::Intensity(7)).unwrap();
            let frames = di.frames();
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].len(), n);
            assert!(frames[0].iter().all(|w| *w == [0x0A, 7]));
        }
    }

    #[test]
    fn send_to_all_wire_format() {
        let di = TestSpyInterface::new();
        let mut chain = Chain::new(di.split(), 2);
        chain.send_to_all(Command::ScanLimit(7)).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            select,
            [0x0B, 7],
            [0x0B, 7],
            latch
        ));
    }

    #[test]
    fn send_to_one_pads_with_noops() {
        let n = 4;
        for k in 0..n {
            let di = TestSpyInterface::new();
            let mut chain = Chain::new(di.split(), n);
            chain.send_to_one(Command::Digit(2, 0x81), k).unwrap();
            let frames = di.frames();
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].len(), n);
            for (i, word) in frames[0].iter().enumerate() {
                if i == k {
                    assert_eq!(*word, [0x03, 0x81]);
                } else {
                    assert_eq!(*word, [0x00, 0x00]);
                }
            }
        }
    }

    #[test]
    fn send_to_one_out_of_range_is_all_noops() {
        let di = TestSpyInterface::new();
        let mut chain = Chain::new(di.split(), 3);
        chain.send_to_one(Command::Digit(0, 0xFF), 3).unwrap();
        chain.send_to_one(Command::Digit(0, 0xFF), 100).unwrap();
        let frames = di.frames();
        assert_eq!(frames.len(), 2);
        for frame in frames {
            assert_eq!(frame, [[0u8, 0]; 3]);
        }
    }

    #[test]
    fn invalid_command_sends_nothing() {
        let di = TestSpyInterface::new();
        let mut chain = Chain::new(di.split(), 2);
        assert_eq!(
            chain.send_to_all(Command::Intensity(16)),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            chain.send_to_one(Command::Digit(8, 0), 0),
            Err(Error::OutOfRange)
        );
        di.check_multi(&[]);
    }

    #[test]
    fn release_returns_interface() {
        let di = TestSpyInterface::new();
        let mut chain = Chain::new(di.split(), 1);
        chain.send_to_all(Command::NoOp).unwrap();
        let mut iface = chain.release();
        iface.clear();
        di.check_multi(&[]);
    }
}
