//! The byte-oriented port to the controller. Commands and display RAM data travel over the same bus
//! and are told apart by a control byte (I2C) or the D/C pin (SPI).

pub trait DisplayInterface {
    type Error;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

pub mod i2c {
    //! The I2C interface. Every transaction starts with a control byte: 0x00 marks the rest of the
    //! transaction as a command, 0x40 as a stream of display RAM data.

    use super::DisplayInterface;

    /// The address the SSD1308 answers to with its SA0 pin low.
    pub const DEFAULT_ADDRESS: u8 = 0x3C;

    const CONTROL_COMMAND: u8 = 0x00;
    const CONTROL_DATA: u8 = 0x40;

    /// Data bytes sent per I2C transaction.
    const DATA_CHUNK: usize = 16;

    pub struct I2cInterface<I2C> {
        i2c: I2C,
        address: u8,
    }

    impl<I2C> I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        /// Create an interface talking to the display at `DEFAULT_ADDRESS`.
        pub fn new(i2c: I2C) -> Self {
            Self::with_address(i2c, DEFAULT_ADDRESS)
        }

        /// Create an interface talking to the display at a 7-bit `address`.
        pub fn with_address(i2c: I2C, address: u8) -> Self {
            Self { i2c, address }
        }

        /// Give back the I2C bus.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    impl<I2C> DisplayInterface for I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        type Error = I2C::Error;

        fn send_command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
            self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), I2C::Error> {
            let mut frame = [CONTROL_DATA; DATA_CHUNK + 1];
            for chunk in buf.chunks(DATA_CHUNK) {
                frame[1..=chunk.len()].copy_from_slice(chunk);
                self.i2c.write(self.address, &frame[..=chunk.len()])?;
            }
            Ok(())
        }
    }

}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits. The "3-wire" mode replaces the D/C GPIO with a 9th bit on each word,
    //! which seems really awkward to implement with embedded_hal SPI.

    use hal::digital::v2::OutputPin;

    use super::DisplayInterface;

    /// A failure of either the SPI bus or the D/C pin.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum SpiError<SE, PE> {
        Spi(SE),
        Pin(PE),
    }

    pub struct SpiInterface<SPI, DC> {
        /// The SPI master device connected to the SSD1308.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1308 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
    }

    impl<SPI, DC> SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, and `dc` is the GPIO output pin connected to the D/C pin of the SSD1308.
        pub fn new(spi: SPI, dc: DC) -> Self {
            Self { spi, dc }
        }

        /// Give back the SPI bus and D/C pin.
        pub fn release(self) -> (SPI, DC) {
            (self.spi, self.dc)
        }
    }

    impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: OutputPin,
    {
        type Error = SpiError<SPI::Error, DC::Error>;

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(SpiError::Pin)?;
            self.spi.write(&[cmd]).map_err(SpiError::Spi)?;
            self.dc.set_high().map_err(SpiError::Pin)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_high().map_err(SpiError::Pin)?;
            self.spi.write(buf).map_err(SpiError::Spi)
        }
    }

}
