/// The link between the driver and a MAX7219 chain: a serial data path plus the LOAD (chip
/// select) line. Words shifted in between `select` and `latch` form one frame; the rising edge
/// on `latch` commits the last word held by every chip in the chain.
pub trait DisplayInterface {
    type Error;

    /// Pull LOAD low so the chain starts accepting shifted-in data.
    fn select(&mut self) -> Result<(), Self::Error>;
    /// Shift bytes into the chain in order, without buffering across calls.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
    /// Raise LOAD, latching the shifted-in words into the chip registers.
    fn latch(&mut self) -> Result<(), Self::Error>;
}

pub mod spi {
    //! The MAX7219 serial interface is write-only SPI with a LOAD line in place of a chip select.
    //! DOUT of the last chip can be wired back to MISO but nothing useful can be read from it.

    use hal::spi::{Mode, MODE_3};

    use super::DisplayInterface;

    /// SPI mode to configure the bus with. The chip samples DIN on the rising clock edge, so
    /// either mode 0 or mode 3 works; mode 3 leaves the clock idling high between frames.
    pub const MODE: Mode = MODE_3;

    /// A conservative bus clock. The chip tolerates up to 10MHz but long module chains with
    /// jumper wires do not.
    pub const BAUD_RATE_HZ: u32 = 1_000_000;

    /// An error from either half of the interface.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum SpiInterfaceError<S, P> {
        Spi(S),
        Pin(P),
    }

    pub struct SpiInterface<SPI, CS> {
        /// The SPI master device connected to DIN and CLK of the first MAX7219 in the chain.
        spi: SPI,
        /// A GPIO output pin connected to the LOAD pin shared by every chip in the chain.
        cs: CS,
    }

    impl<SPI, CS> SpiInterface<SPI, CS>
    where
        SPI: hal::blocking::spi::Write<u8>,
        CS: hal::digital::v2::OutputPin,
    {
        /// Create a new SPI interface to communicate with the chain. `spi` is the SPI master
        /// device, configured with `MODE` and 8-bit words, and `cs` is the GPIO output pin
        /// connected to LOAD.
        pub fn new(spi: SPI, cs: CS) -> Self {
            Self { spi, cs }
        }

        /// Give back the SPI device and LOAD pin.
        pub fn release(self) -> (SPI, CS) {
            (self.spi, self.cs)
        }
    }

    impl<SPI, CS> DisplayInterface for SpiInterface<SPI, CS>
    where
        SPI: hal::blocking::spi::Write<u8>,
        CS: hal::digital::v2::OutputPin,
    {
        type Error = SpiInterfaceError<SPI::Error, CS::Error>;

        fn select(&mut self) -> Result<(), Self::Error> {
            self.cs.set_low().map_err(SpiInterfaceError::Pin)
        }

        fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.spi.write(bytes).map_err(SpiInterfaceError::Spi)
        }

        fn latch(&mut self) -> Result<(), Self::Error> {
            self.cs.set_high().map_err(SpiInterfaceError::Pin)
        }
    }

}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use super::DisplayInterface;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Select,
        Data(Vec<u8>),
        Latch,
    }

    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Make another handle onto the same log, so one can be moved into a driver while the
        /// other stays with the test.
        pub fn split(&self) -> Self {
            TestSpyInterface {
                sent: self.sent.clone(),
            }
        }

        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(&self.sent.borrow()[..], expect);
        }

        pub fn clear(&mut self) {
            self.sent.borrow_mut().clear()
        }

        /// Decode the log into frames of `[register, data]` words, asserting that every frame is
        /// correctly bracketed by select and latch.
        pub fn frames(&self) -> Vec<Vec<[u8; 2]>> {
            let mut frames = Vec::new();
            let mut current: Option<Vec<u8>> = None;
            for sent in self.sent.borrow().iter() {
                match sent {
                    Sent::Select => {
                        assert!(current.is_none(), "select inside a frame");
                        current = Some(Vec::new());
                    }
                    Sent::Data(bytes) => current
                        .as_mut()
                        .expect("data outside a frame")
                        .extend_from_slice(bytes),
                    Sent::Latch => {
                        let bytes = current.take().expect("latch without select");
                        assert_eq!(bytes.len() % 2, 0, "frame ends mid-word");
                        frames.push(bytes.chunks(2).map(|w| [w[0], w[1]]).collect());
                    }
                }
            }
            assert!(current.is_none(), "frame never latched");
            frames
        }
    }

    impl DisplayInterface for TestSpyInterface {
        type Error = ();

        fn select(&mut self) -> Result<(), ()> {
            self.sent.borrow_mut().push(Sent::Select);
            Ok(())
        }
        fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
            self.sent.borrow_mut().push(Sent::Data(bytes.to_vec()));
            Ok(())
        }
        fn latch(&mut self) -> Result<(), ()> {
            self.sent.borrow_mut().push(Sent::Latch);
            Ok(())
        }
    }
}
