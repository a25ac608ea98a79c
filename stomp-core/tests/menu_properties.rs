//! Property tests for the setup menu

use proptest::prelude::*;
use stomp_core::menu::{ids, setup_menu, NodeId, Redraw, SetupContext};
use stomp_core::settings::{MemoryStore, Setting, SettingsStore};
use stomp_core::{BatteryStatus, Direction};

/// Counts every write so commits can be checked for exactly-once
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    writes: Vec<(Setting, u8)>,
}

impl SettingsStore for RecordingStore {
    fn get(&self, key: Setting) -> u8 {
        self.inner.get(key)
    }

    fn set(&mut self, key: Setting, value: u8) {
        self.writes.push((key, value));
        self.inner.set(key, value);
    }
}

fn context() -> SetupContext<RecordingStore> {
    SetupContext::new(RecordingStore::default(), BatteryStatus::default())
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Cw), Just(Direction::Ccw)]
}

/// Roots with a single-stage editor, their setting and range
const SIMPLE_EDITORS: [(NodeId, Setting, u8, u8); 3] = [
    (ids::LEDS, Setting::LedBrightness, 1, 20),
    (ids::DISPLAY, Setting::TftBrightness, 1, 20),
    (ids::MIRROR, Setting::MirrorDelay, 1, 30),
];

fn go_to(menu: &mut stomp_core::menu::SetupMenu, ctx: &mut SetupContext<RecordingStore>, target: NodeId) {
    while menu.current() != Some(target) {
        menu.next(ctx).unwrap();
    }
}

proptest! {
    #[test]
    fn next_and_prev_close_the_cycle(start in 0usize..7, forward in any::<bool>()) {
        let mut menu = setup_menu().unwrap();
        let mut ctx = context();
        menu.begin(&mut ctx).unwrap();
        for _ in 0..start {
            menu.next(&mut ctx).unwrap();
        }
        let origin = menu.current();

        for _ in 0..menu.root_count() {
            let update = if forward {
                menu.next(&mut ctx)
            } else {
                menu.prev(&mut ctx)
            };
            prop_assert_eq!(update.unwrap().redraw, Redraw::Enter);
        }
        prop_assert_eq!(menu.current(), origin);
    }

    #[test]
    fn next_then_prev_is_identity(start in 0usize..7) {
        let mut menu = setup_menu().unwrap();
        let mut ctx = context();
        menu.begin(&mut ctx).unwrap();
        for _ in 0..start {
            menu.next(&mut ctx).unwrap();
        }
        let origin = menu.current();
        menu.next(&mut ctx).unwrap();
        menu.prev(&mut ctx).unwrap();
        prop_assert_eq!(menu.current(), origin);
    }

    #[test]
    fn detail_round_trip_commits_once(
        editor in 0usize..3,
        turns in proptest::collection::vec(direction(), 0..40),
    ) {
        let (root, setting, low, high) = SIMPLE_EDITORS[editor];
        let mut menu = setup_menu().unwrap();
        let mut ctx = context();
        menu.begin(&mut ctx).unwrap();
        go_to(&mut menu, &mut ctx, root);

        let start = ctx.store.get(setting);
        prop_assert!(menu.on_press(&mut ctx).unwrap().detail);

        let mut expected = i16::from(start);
        for direction in &turns {
            menu.on_turn(&mut ctx, *direction);
            expected = (expected + direction.delta()).clamp(i16::from(low), i16::from(high));
        }
        prop_assert!(ctx.store.writes.is_empty());

        let back = menu.on_press(&mut ctx).unwrap();
        prop_assert_eq!(back.node, root);
        prop_assert!(!back.detail);
        prop_assert_eq!(ctx.store.writes.clone(), vec![(setting, expected as u8)]);
    }

    #[test]
    fn cc_editor_commits_selected_slot_once(
        slot_turns in 0usize..8,
        value_turns in proptest::collection::vec(direction(), 0..300),
    ) {
        let mut menu = setup_menu().unwrap();
        let mut ctx = context();
        menu.begin(&mut ctx).unwrap();
        go_to(&mut menu, &mut ctx, ids::STOMP_CC);

        menu.on_press(&mut ctx).unwrap();
        for _ in 0..slot_turns {
            menu.on_turn(&mut ctx, Direction::Cw);
        }
        let slot = (slot_turns % 4) as u8;

        // Select stage press stays on the editor
        let stay = menu.on_press(&mut ctx).unwrap();
        prop_assert_eq!(stay.node, ids::STOMP_CC_EDIT);
        prop_assert_eq!(stay.redraw, Redraw::Value);

        let mut expected = i16::from(ctx.store.get(Setting::StompCc(slot)));
        for direction in &value_turns {
            menu.on_turn(&mut ctx, *direction);
            expected = (expected + direction.delta()).rem_euclid(128);
        }

        let back = menu.on_press(&mut ctx).unwrap();
        prop_assert_eq!(back.node, ids::STOMP_CC);
        prop_assert_eq!(ctx.store.writes.clone(), vec![(Setting::StompCc(slot), expected as u8)]);
    }
}
