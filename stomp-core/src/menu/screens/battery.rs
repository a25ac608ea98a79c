//! Battery screen

use crate::battery::BatteryStatus;
use crate::menu::node::MenuNode;
use crate::menu::view::View;
use crate::settings::SettingsStore;

use super::SetupContext;

/// Shows charge level; redraws only when the status changes
#[derive(Debug, Default)]
pub struct BatteryScreen {
    shown: Option<BatteryStatus>,
}

impl BatteryScreen {
    pub const fn new() -> Self {
        Self { shown: None }
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for BatteryScreen {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        self.shown = Some(ctx.battery);
        View::Battery(ctx.battery)
    }

    fn refresh(&mut self, ctx: &mut SetupContext<S>) -> Option<View> {
        if self.shown == Some(ctx.battery) {
            return None;
        }
        self.shown = Some(ctx.battery);
        Some(View::Battery(ctx.battery))
    }

    fn reset(&mut self) {
        self.shown = None;
    }
}
