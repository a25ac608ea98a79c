//! MIDI channel screens
//!
//! The editor has two stages: pick the port (BLE or DIN), then pick its
//! channel. Only the port being edited is written on commit.

use crate::input::Direction;
use crate::menu::node::{MenuNode, PressOutcome};
use crate::menu::view::{EditStage, MidiPort, View};
use crate::settings::values::MIDI_CHANNELS;
use crate::settings::{Setting, SettingsStore};

use super::{step_wrapped, SetupContext};

impl MidiPort {
    /// Setting holding this port's channel
    pub const fn setting(self) -> Setting {
        match self {
            MidiPort::Ble => Setting::BleChannel,
            MidiPort::Din => Setting::DinChannel,
        }
    }
}

/// Shows both channels
#[derive(Debug)]
pub struct MidiChannelsOverview;

impl<S: SettingsStore> MenuNode<SetupContext<S>> for MidiChannelsOverview {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        View::MidiChannels {
            ble: ctx.store.get(Setting::BleChannel),
            din: ctx.store.get(Setting::DinChannel),
            focus: None,
        }
    }
}

/// Select-then-edit channel editor
#[derive(Debug)]
pub struct MidiChannelEditor {
    port: MidiPort,
    stage: EditStage,
    ble: u8,
    din: u8,
}

impl Default for MidiChannelEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiChannelEditor {
    pub const fn new() -> Self {
        Self {
            port: MidiPort::Ble,
            stage: EditStage::Select,
            ble: 1,
            din: 1,
        }
    }

    fn view(&self) -> View {
        View::MidiChannels {
            ble: self.ble,
            din: self.din,
            focus: Some((self.port, self.stage)),
        }
    }

    fn channel_mut(&mut self) -> &mut u8 {
        match self.port {
            MidiPort::Ble => &mut self.ble,
            MidiPort::Din => &mut self.din,
        }
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for MidiChannelEditor {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        self.port = MidiPort::Ble;
        self.stage = EditStage::Select;
        self.ble = ctx.store.get(Setting::BleChannel);
        self.din = ctx.store.get(Setting::DinChannel);
        self.view()
    }

    fn on_turn(&mut self, _ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        match self.stage {
            EditStage::Select => self.port = self.port.other(),
            EditStage::Edit => {
                let channel = self.channel_mut();
                *channel = step_wrapped(*channel, direction.delta(), MIDI_CHANNELS);
            }
        }
        Some(self.view())
    }

    fn on_press(&mut self, ctx: &mut SetupContext<S>) -> PressOutcome {
        match self.stage {
            EditStage::Select => {
                self.stage = EditStage::Edit;
                PressOutcome::Stay(self.view())
            }
            EditStage::Edit => {
                let value = *self.channel_mut();
                ctx.store.set(self.port.setting(), value);
                PressOutcome::Done
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
