//! Fader and stomp CC assignment screens
//!
//! Select a slot, then set its CC number. Turns step by one and wrap;
//! toggles in the edit stage step by ten and stop at the ends.

use crate::config::STOMP_COUNT;
use crate::input::Direction;
use crate::menu::node::{MenuNode, PressOutcome};
use crate::menu::view::{CcBank, EditStage, View};
use crate::settings::values::CC_NUMBERS;
use crate::settings::{Setting, SettingsStore};

use super::{step_clamped, step_wrapped, SetupContext};

/// Coarse step applied by the toggles while editing a CC number
pub const COARSE_STEP: i16 = 10;

impl CcBank {
    /// Setting for one slot of this bank
    pub const fn setting(self, slot: u8) -> Setting {
        match self {
            CcBank::Fader => Setting::FaderCc(slot),
            CcBank::Stomp => Setting::StompCc(slot),
        }
    }

    fn load<S: SettingsStore>(self, store: &S) -> [u8; STOMP_COUNT] {
        core::array::from_fn(|slot| store.get(self.setting(slot as u8)))
    }
}

/// Shows all four CC numbers of a bank
#[derive(Debug)]
pub struct CcOverview {
    bank: CcBank,
}

impl CcOverview {
    pub const fn new(bank: CcBank) -> Self {
        Self { bank }
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for CcOverview {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        View::CcAssignments {
            bank: self.bank,
            values: self.bank.load(&ctx.store),
            focus: None,
        }
    }
}

/// Select-then-edit CC editor
#[derive(Debug)]
pub struct CcEditor {
    bank: CcBank,
    slot: u8,
    stage: EditStage,
    values: [u8; STOMP_COUNT],
}

impl CcEditor {
    pub const fn new(bank: CcBank) -> Self {
        Self {
            bank,
            slot: 0,
            stage: EditStage::Select,
            values: [0; STOMP_COUNT],
        }
    }

    fn view(&self) -> View {
        View::CcAssignments {
            bank: self.bank,
            values: self.values,
            focus: Some((self.slot, self.stage)),
        }
    }

    fn step(&mut self, delta: i16, coarse: bool) -> Option<View> {
        match self.stage {
            EditStage::Select => {
                self.slot = step_wrapped(self.slot, delta.signum(), 0..=STOMP_COUNT as u8 - 1);
            }
            EditStage::Edit => {
                let value = &mut self.values[self.slot as usize];
                let next = if coarse {
                    step_clamped(*value, delta, CC_NUMBERS)
                } else {
                    step_wrapped(*value, delta, CC_NUMBERS)
                };
                if next == *value {
                    return None;
                }
                *value = next;
            }
        }
        Some(self.view())
    }
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for CcEditor {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        self.slot = 0;
        self.stage = EditStage::Select;
        self.values = self.bank.load(&ctx.store);
        self.view()
    }

    fn on_turn(&mut self, _ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        self.step(direction.delta(), false)
    }

    fn on_toggle(&mut self, _ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        match self.stage {
            EditStage::Select => self.step(direction.delta(), false),
            EditStage::Edit => self.step(direction.delta() * COARSE_STEP, true),
        }
    }

    fn on_press(&mut self, ctx: &mut SetupContext<S>) -> PressOutcome {
        match self.stage {
            EditStage::Select => {
                self.stage = EditStage::Edit;
                PressOutcome::Stay(self.view())
            }
            EditStage::Edit => {
                let slot = self.slot;
                ctx.store.set(self.bank.setting(slot), self.values[slot as usize]);
                PressOutcome::Done
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.bank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::BatteryStatus;
    use crate::settings::MemoryStore;

    fn ctx() -> SetupContext<MemoryStore> {
        SetupContext::new(MemoryStore::default(), BatteryStatus::default())
    }

    #[test]
    fn test_slot_selection_wraps() {
        let mut ctx = ctx();
        let mut editor = CcEditor::new(CcBank::Stomp);
        editor.enter(&mut ctx);
        let view = editor.on_turn(&mut ctx, Direction::Ccw).unwrap();
        assert!(matches!(
            view,
            View::CcAssignments {
                focus: Some((3, EditStage::Select)),
                ..
            }
        ));
    }

    #[test]
    fn test_edit_slot_and_commit() {
        let mut ctx = ctx();
        let mut editor = CcEditor::new(CcBank::Fader);
        editor.enter(&mut ctx);

        editor.on_turn(&mut ctx, Direction::Cw);
        editor.on_press(&mut ctx);
        editor.on_turn(&mut ctx, Direction::Cw);
        editor.on_toggle(&mut ctx, Direction::Cw);
        assert_eq!(editor.on_press(&mut ctx), PressOutcome::Done);

        // slot 1 default 21, +1 +10
        assert_eq!(ctx.store.get(Setting::FaderCc(1)), 32);
        assert_eq!(ctx.store.get(Setting::FaderCc(0)), 20);
    }

    #[test]
    fn test_fine_step_wraps_coarse_step_clamps() {
        let mut ctx = ctx();
        ctx.store.set(Setting::StompCc(0), 127);
        let mut editor = CcEditor::new(CcBank::Stomp);
        editor.enter(&mut ctx);
        editor.on_press(&mut ctx);

        assert_eq!(editor.on_toggle(&mut ctx, Direction::Cw), None);
        editor.on_turn(&mut ctx, Direction::Cw);
        editor.on_press(&mut ctx);
        assert_eq!(ctx.store.get(Setting::StompCc(0)), 0);
    }

    #[test]
    fn test_toggle_in_select_moves_one_slot() {
        let mut ctx = ctx();
        let mut editor = CcEditor::new(CcBank::Stomp);
        editor.enter(&mut ctx);
        let view = editor.on_toggle(&mut ctx, Direction::Cw).unwrap();
        assert!(matches!(
            view,
            View::CcAssignments {
                focus: Some((1, EditStage::Select)),
                ..
            }
        ));
    }
}
