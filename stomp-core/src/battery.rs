//! Battery status
//!
//! The battery screen only needs a charge percentage and whether USB power
//! is present. Both come from raw readings taken by the firmware: the
//! MAX17048 state-of-charge register and an ADC count on the VBUS divider.

/// ADC counts at or above which USB power is considered present
pub const VBUS_PRESENT_COUNTS: u16 = 1450;

/// Snapshot shown on the battery screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// State of charge, 0..=100
    pub percent: u8,
    /// USB power present
    pub charging: bool,
}

impl BatteryStatus {
    /// Build from raw gauge and VBUS readings
    ///
    /// `soc_register` is the gauge's 16-bit state of charge in 1/256 %
    /// units. Gauges report slightly above 100 % when full; that is clamped.
    pub fn from_readings(soc_register: u16, vbus_counts: u16) -> Self {
        let rounded = (u32::from(soc_register) + 128) >> 8;
        Self {
            percent: rounded.min(100) as u8,
            charging: vbus_counts >= VBUS_PRESENT_COUNTS,
        }
    }
}
