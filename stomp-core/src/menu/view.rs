//! Render descriptors
//!
//! A [`View`] is everything a renderer needs to draw a screen body. Menu
//! nodes return one on enter and whenever their value changes.

use crate::battery::BatteryStatus;
use crate::config::STOMP_COUNT;

/// Which brightness a level screen controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LevelTarget {
    /// Status LEDs
    Led,
    /// Display backlight
    Tft,
}

/// MIDI output port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiPort {
    Ble,
    Din,
}

impl MidiPort {
    /// The other port
    pub const fn other(self) -> Self {
        match self {
            MidiPort::Ble => MidiPort::Din,
            MidiPort::Din => MidiPort::Ble,
        }
    }
}

/// Group of four CC assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CcBank {
    Fader,
    Stomp,
}

/// Stage of a two-step editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditStage {
    /// Choosing which item to edit
    Select,
    /// Changing the chosen item's value
    Edit,
}

/// Screen body contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    /// Charge level and USB power
    Battery(BatteryStatus),
    /// Brightness bar; `editing` on the detail screen
    Level {
        target: LevelTarget,
        value: u8,
        editing: bool,
    },
    /// Both MIDI channels; `focus` is set on the detail screen
    MidiChannels {
        ble: u8,
        din: u8,
        focus: Option<(MidiPort, EditStage)>,
    },
    /// Four CC numbers; `focus` holds the selected slot on the detail screen
    CcAssignments {
        bank: CcBank,
        values: [u8; STOMP_COUNT],
        focus: Option<(u8, EditStage)>,
    },
    /// Mirror delay in tenths of a second
    MirrorDelay { tenths: u8, editing: bool },
}

impl View {
    /// Brightness the hardware should show while this view is on screen
    ///
    /// Level screens preview their value live, so the firmware applies
    /// this on every update rather than only after a commit.
    pub const fn brightness(&self) -> Option<(LevelTarget, u8)> {
        match *self {
            View::Level { target, value, .. } => Some((target, value)),
            _ => None,
        }
    }
}
