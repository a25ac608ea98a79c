//! MAX17048 fuel gauge
//!
//! Only the state-of-charge register is read; the gauge's ModelGauge
//! algorithm needs no host-side calibration.

use embedded_hal::i2c::I2c;

/// 7-bit I2C address
const ADDRESS: u8 = 0x36;

/// State of charge, 1/256 % per LSB, big endian
const REG_SOC: u8 = 0x04;
/// Silicon version
const REG_VERSION: u8 = 0x08;

/// MAX17048 over a blocking I2C bus
pub struct Max17048<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Max17048<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    fn read_register(&mut self, register: u8) -> Result<u16, I2C::Error> {
        let mut buffer = [0u8; 2];
        self.i2c.write_read(ADDRESS, &[register], &mut buffer)?;
        Ok(u16::from_be_bytes(buffer))
    }

    /// Raw state-of-charge register
    pub fn soc_register(&mut self) -> Result<u16, I2C::Error> {
        self.read_register(REG_SOC)
    }

    /// Silicon version; useful to confirm the gauge answers at boot
    pub fn version(&mut self) -> Result<u16, I2C::Error> {
        self.read_register(REG_VERSION)
    }
}
