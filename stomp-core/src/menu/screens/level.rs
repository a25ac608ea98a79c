//! LED and display brightness screens

use crate::input::Direction;
use crate::menu::node::{MenuNode, PressOutcome};
use crate::menu::view::{LevelTarget, View};
use crate::settings::{Setting, SettingsStore};

use super::{step_clamped, SetupContext};

impl LevelTarget {
    /// Setting holding this brightness
    pub const fn setting(self) -> Setting {
        match self {
            LevelTarget::Led => Setting::LedBrightness,
            LevelTarget::Tft => Setting::TftBrightness,
        }
    }
}

/// Shows the stored brightness
#[derive(Debug)]
pub struct LevelOverview {
    target: LevelTarget,
}

impl LevelOverview {
    pub const fn new(target: LevelTarget) -> Self {
        Self { target }
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for LevelOverview {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        View::Level {
            target: self.target,
            value: ctx.store.get(self.target.setting()),
            editing: false,
        }
    }
}

/// Edits a brightness; clamps at the ends of the range
#[derive(Debug)]
pub struct LevelEditor {
    target: LevelTarget,
    value: u8,
}

impl LevelEditor {
    pub const fn new(target: LevelTarget) -> Self {
        Self { target, value: 0 }
    }

    fn view(&self) -> View {
        View::Level {
            target: self.target,
            value: self.value,
            editing: true,
        }
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for LevelEditor {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        self.value = ctx.store.get(self.target.setting());
        self.view()
    }

    fn on_turn(&mut self, _ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        let next = step_clamped(self.value, direction.delta(), self.target.setting().range());
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(self.view())
    }

    fn on_press(&mut self, ctx: &mut SetupContext<S>) -> PressOutcome {
        ctx.store.set(self.target.setting(), self.value);
        PressOutcome::Done
    }
}
