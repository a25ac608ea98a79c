//! Mirror delay screens

use crate::input::Direction;
use crate::menu::node::{MenuNode, PressOutcome};
use crate::menu::view::View;
use crate::settings::values::MIRROR_DELAY_TENTHS;
use crate::settings::{Setting, SettingsStore};

use super::{step_clamped, SetupContext};

/// Shows the stored delay
#[derive(Debug)]
pub struct MirrorDelayOverview;

impl<S: SettingsStore> MenuNode<SetupContext<S>> for MirrorDelayOverview {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        View::MirrorDelay {
            tenths: ctx.store.get(Setting::MirrorDelay),
            editing: false,
        }
    }
}

/// Edits the delay in 0.1 s steps between 0.1 s and 3.0 s
#[derive(Debug, Default)]
pub struct MirrorDelayEditor {
    tenths: u8,
}

impl MirrorDelayEditor {
    pub const fn new() -> Self {
        Self { tenths: 0 }
    }

    fn view(&self) -> View {
        View::MirrorDelay {
            tenths: self.tenths,
            editing: true,
        }
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for MirrorDelayEditor {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        self.tenths = ctx.store.get(Setting::MirrorDelay);
        self.view()
    }

    fn on_turn(&mut self, _ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        let next = step_clamped(self.tenths, direction.delta(), MIRROR_DELAY_TENTHS);
        if next == self.tenths {
            return None;
        }
        self.tenths = next;
        Some(self.view())
    }

    fn on_press(&mut self, ctx: &mut SetupContext<S>) -> PressOutcome {
        ctx.store.set(Setting::MirrorDelay, self.tenths);
        PressOutcome::Done
    }
}
