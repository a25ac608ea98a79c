//! Setting keys, ranges and defaults

use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::STOMP_COUNT;

/// MIDI channel range
pub const MIDI_CHANNELS: RangeInclusive<u8> = 1..=16;
/// MIDI control-change number range
pub const CC_NUMBERS: RangeInclusive<u8> = 0..=127;
/// LED and TFT brightness steps
pub const BRIGHTNESS_STEPS: RangeInclusive<u8> = 1..=20;
/// Mirror delay in tenths of a second (0.1 s to 3.0 s)
pub const MIRROR_DELAY_TENTHS: RangeInclusive<u8> = 1..=30;

/// A single user setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setting {
    /// MIDI channel for BLE output
    BleChannel,
    /// MIDI channel for the DIN socket
    DinChannel,
    /// CC number sent by fader `0..4`
    FaderCc(u8),
    /// CC number sent by stomp switch `0..4`
    StompCc(u8),
    /// LED ring brightness step
    LedBrightness,
    /// Display backlight brightness step
    TftBrightness,
    /// Mirror delay in tenths of a second
    MirrorDelay,
}

impl Setting {
    /// Valid values for this setting
    pub const fn range(self) -> RangeInclusive<u8> {
        match self {
            Setting::BleChannel | Setting::DinChannel => MIDI_CHANNELS,
            Setting::FaderCc(_) | Setting::StompCc(_) => CC_NUMBERS,
            Setting::LedBrightness | Setting::TftBrightness => BRIGHTNESS_STEPS,
            Setting::MirrorDelay => MIRROR_DELAY_TENTHS,
        }
    }

    /// Clamp a value into range
    pub fn clamp(self, value: u8) -> u8 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

/// All user settings
///
/// This is the persisted record. Field order is part of the stored format;
/// bump the schema version when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub ble_channel: u8,
    pub din_channel: u8,
    pub fader_cc: [u8; STOMP_COUNT],
    pub stomp_cc: [u8; STOMP_COUNT],
    pub led_brightness: u8,
    pub tft_brightness: u8,
    /// Tenths of a second
    pub mirror_delay: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ble_channel: 1,
            din_channel: 1,
            fader_cc: [20, 21, 22, 23],
            stomp_cc: [24, 25, 26, 27],
            led_brightness: 10,
            tft_brightness: 10,
            // 0.25 s rounded onto the 0.1 s grid
            mirror_delay: 3,
        }
    }
}

impl Settings {
    /// Read a setting; out-of-range slot indices read as 0
    pub fn get(&self, key: Setting) -> u8 {
        match key {
            Setting::BleChannel => self.ble_channel,
            Setting::DinChannel => self.din_channel,
            Setting::FaderCc(slot) => self.fader_cc.get(slot as usize).copied().unwrap_or(0),
            Setting::StompCc(slot) => self.stomp_cc.get(slot as usize).copied().unwrap_or(0),
            Setting::LedBrightness => self.led_brightness,
            Setting::TftBrightness => self.tft_brightness,
            Setting::MirrorDelay => self.mirror_delay,
        }
    }

    /// Write a setting, clamped into its range
    ///
    /// Returns `false` if the key names a slot that does not exist.
    pub fn set(&mut self, key: Setting, value: u8) -> bool {
        let value = key.clamp(value);
        let slot = match key {
            Setting::BleChannel => &mut self.ble_channel,
            Setting::DinChannel => &mut self.din_channel,
            Setting::FaderCc(slot) => match self.fader_cc.get_mut(slot as usize) {
                Some(cc) => cc,
                None => return false,
            },
            Setting::StompCc(slot) => match self.stomp_cc.get_mut(slot as usize) {
                Some(cc) => cc,
                None => return false,
            },
            Setting::LedBrightness => &mut self.led_brightness,
            Setting::TftBrightness => &mut self.tft_brightness,
            Setting::MirrorDelay => &mut self.mirror_delay,
        };
        *slot = value;
        true
    }

    /// Every value clamped into range
    ///
    /// Applied to records read back from flash.
    pub fn sanitized(mut self) -> Self {
        for key in all_keys() {
            let value = self.get(key);
            self.set(key, value);
        }
        self
    }
}

/// Every setting key
pub fn all_keys() -> impl Iterator<Item = Setting> {
    let slots = 0..STOMP_COUNT as u8;
    [Setting::BleChannel, Setting::DinChannel]
        .into_iter()
        .chain(slots.clone().map(Setting::FaderCc))
        .chain(slots.map(Setting::StompCc))
        .chain([
            Setting::LedBrightness,
            Setting::TftBrightness,
            Setting::MirrorDelay,
        ])
}
