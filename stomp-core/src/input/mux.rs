//! 8-channel multiplexer scanner
//!
//! Drives the three address lines of a 4051-style analog multiplexer and
//! samples its shared output. The inputs behind it are switches to ground
//! with pull-ups, so a low reading means "active".

use stomp_hal::{DelayUs, InputPin, OutputPin};

use crate::config::{MUX_CHANNELS, MUX_SETTLE_US};

/// Errors from building [`AddressBits`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressBitsError {
    /// Bit position is not in 0..3
    BitOutOfRange(u8),
    /// Two lines share one bit
    DuplicateBit(u8),
}

/// Which bit of the channel number drives each address line
///
/// Always a permutation of bits 0, 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressBits {
    /// Bit position per line, in A, B, C order
    bits: [u8; 3],
}

impl AddressBits {
    /// A = bit 0, B = bit 1, C = bit 2
    pub const STRAIGHT: AddressBits = AddressBits { bits: [0, 1, 2] };

    /// Bit positions for lines A, B and C
    pub fn new(a: u8, b: u8, c: u8) -> Result<Self, AddressBitsError> {
        let bits = [a, b, c];
        let mut seen = [false; 3];
        for bit in bits {
            let slot = seen
                .get_mut(bit as usize)
                .ok_or(AddressBitsError::BitOutOfRange(bit))?;
            if *slot {
                return Err(AddressBitsError::DuplicateBit(bit));
            }
            *slot = true;
        }
        Ok(Self { bits })
    }

    /// Line levels for a channel, in A, B, C order
    pub const fn levels(&self, channel: u8) -> [bool; 3] {
        let [a, b, c] = self.bits;
        [
            (channel >> a) & 1 == 1,
            (channel >> b) & 1 == 1,
            (channel >> c) & 1 == 1,
        ]
    }
}

impl Default for AddressBits {
    fn default() -> Self {
        Self::STRAIGHT
    }
}

/// Active state of all eight channels from one scan, indexed by address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanFrame([bool; MUX_CHANNELS]);

impl ScanFrame {
    /// Build a frame from per-address active levels
    pub const fn from_levels(levels: [bool; MUX_CHANNELS]) -> Self {
        Self(levels)
    }

    /// Active state of one address; out-of-range addresses read inactive
    pub fn channel(&self, address: u8) -> bool {
        self.0.get(address as usize).copied().unwrap_or(false)
    }

    /// Per-address levels
    pub const fn levels(&self) -> [bool; MUX_CHANNELS] {
        self.0
    }
}

/// Multiplexer scanner
///
/// Holds the address lines, the shared output line and a settle delay.
/// The only state is the last driven address, which lets repeated reads of
/// one channel skip the settle wait.
pub struct MuxScanner<O, I, D> {
    address: [O; 3],
    common: I,
    delay: D,
    bits: AddressBits,
    settle_us: u32,
    selected: Option<u8>,
}

impl<O: OutputPin, I: InputPin, D: DelayUs> MuxScanner<O, I, D> {
    /// Create a scanner; `address` is ordered A, B, C
    pub fn new(address: [O; 3], common: I, delay: D, bits: AddressBits) -> Self {
        Self {
            address,
            common,
            delay,
            bits,
            settle_us: MUX_SETTLE_US,
            selected: None,
        }
    }

    /// Override the settle time after an address change
    pub fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    /// Drive the address lines for `channel` (0..8) and wait for the output
    /// to settle
    ///
    /// Channels above 7 are reduced modulo 8.
    pub fn select(&mut self, channel: u8) {
        let channel = channel % MUX_CHANNELS as u8;
        if self.selected == Some(channel) {
            return;
        }

        for (line, high) in self.address.iter_mut().zip(self.bits.levels(channel)) {
            line.set_state(high);
        }
        self.delay.delay_us(self.settle_us);
        self.selected = Some(channel);
    }

    /// Sample the shared output of the selected channel
    ///
    /// Returns `true` when the line is low (control active).
    pub fn read(&mut self) -> bool {
        self.common.is_low()
    }

    /// Select and read a single channel
    pub fn read_channel(&mut self, channel: u8) -> bool {
        self.select(channel);
        self.read()
    }

    /// Read channels 0..8 in order
    pub fn scan_all(&mut self) -> ScanFrame {
        let mut levels = [false; MUX_CHANNELS];
        for (channel, level) in levels.iter_mut().enumerate() {
            *level = self.read_channel(channel as u8);
        }
        ScanFrame(levels)
    }

    /// Release the pins
    pub fn release(self) -> ([O; 3], I, D) {
        (self.address, self.common, self.delay)
    }
}
