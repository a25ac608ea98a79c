//! Setup session
//!
//! Ties the input layer to the setup menu. The firmware feeds one
//! [`RawSample`] per tick and draws whatever [`Update`]s come back.

use heapless::Vec;

use crate::battery::BatteryStatus;
use crate::input::{InputConfig, InputEvent, InputTracker, RawSample, MAX_EVENTS_PER_POLL};
use crate::menu::{setup_menu, MenuError, NodeId, SetupContext, SetupMenu, Update};
use crate::settings::SettingsStore;

/// Render updates from one tick
pub type Updates = Vec<Update, MAX_EVENTS_PER_POLL>;

/// Input tracker, setup menu and the context its screens edit
pub struct SetupSession<S> {
    tracker: InputTracker,
    menu: SetupMenu,
    ctx: SetupContext<S>,
}

impl<S: SettingsStore> SetupSession<S> {
    /// Build the menu and enter the first screen
    ///
    /// Returns the session and the update for the initial screen.
    pub fn new(
        store: S,
        battery: BatteryStatus,
        config: InputConfig,
        sample: &RawSample,
        now: u32,
    ) -> Result<(Self, Update), MenuError> {
        let mut menu = setup_menu()?;
        let mut ctx = SetupContext::new(store, battery);
        let first = menu.begin(&mut ctx)?;
        let session = Self {
            tracker: InputTracker::new(config, sample, now),
            menu,
            ctx,
        };
        Ok((session, first))
    }

    /// Process one tick of raw input
    pub fn poll(&mut self, sample: &RawSample, now: u32) -> Updates {
        let mut updates = Updates::new();

        for event in self.tracker.poll(sample, now) {
            if let Some(update) = self.handle(event) {
                // At most one update per event.
                let _ = updates.push(update);
            }
        }

        updates
    }

    fn handle(&mut self, event: InputEvent) -> Option<Update> {
        match event {
            InputEvent::Turn(direction) => self.menu.on_turn(&mut self.ctx, direction),
            InputEvent::Toggle(direction) => self.menu.on_toggle(&mut self.ctx, direction),
            InputEvent::Press => {
                let was_detail = self.menu.is_detail();
                let update = self.menu.on_press(&mut self.ctx);
                if was_detail && !self.menu.is_detail() {
                    // A held toggle must be released before it repeats again.
                    self.tracker.cancel_repeats();
                }
                update
            }
            InputEvent::MirrorLongPress => {
                info!("session: mirror long press, resetting menu");
                self.tracker.cancel_repeats();
                self.menu.reset(&mut self.ctx)
            }
            InputEvent::MirrorShortPress => {
                debug!("session: mirror short press");
                None
            }
            InputEvent::Stomp { index, pressed } => {
                trace!("session: stomp {} pressed={}", index, pressed);
                None
            }
        }
    }

    /// Report a new battery reading
    ///
    /// Yields a value redraw if the battery screen is showing and the
    /// status changed.
    pub fn set_battery(&mut self, status: BatteryStatus) -> Option<Update> {
        self.ctx.battery = status;
        self.menu.refresh(&mut self.ctx)
    }

    /// Active node
    pub fn current(&self) -> Option<NodeId> {
        self.menu.current()
    }

    pub fn is_detail(&self) -> bool {
        self.menu.is_detail()
    }

    pub fn store(&self) -> &S {
        &self.ctx.store
    }

    pub fn battery(&self) -> BatteryStatus {
        self.ctx.battery
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ChannelMap, LogicalInput, ScanFrame};
    use crate::menu::{ids, Redraw, View};
    use crate::settings::{MemoryStore, Setting};

    /// Drives a session with explicit control levels and a detent-accurate encoder
    struct Rig {
        session: SetupSession<MemoryStore>,
        now: u32,
        held: std::vec::Vec<LogicalInput>,
        phase: usize,
    }

    /// Gray sequence for one clockwise detent starting from (1, 1)
    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];

    impl Rig {
        fn new() -> Self {
            let sample = Self::sample_for(&[], 3);
            let (session, first) = SetupSession::new(
                MemoryStore::default(),
                BatteryStatus {
                    percent: 64,
                    charging: false,
                },
                InputConfig::default(),
                &sample,
                0,
            )
            .unwrap();
            assert_eq!(first.node, ids::BATTERY);
            Self {
                session,
                now: 0,
                held: std::vec::Vec::new(),
                phase: 3,
            }
        }

        fn sample_for(held: &[LogicalInput], phase: usize) -> RawSample {
            let map = ChannelMap::DEFAULT;
            let mut levels = [false; 8];
            for input in held {
                levels[map.address(*input) as usize] = true;
            }
            let (a, b) = CW[phase];
            RawSample {
                frame: ScanFrame::from_levels(levels),
                encoder_a: a,
                encoder_b: b,
            }
        }

        fn tick(&mut self, ms: u32) -> std::vec::Vec<Update> {
            self.now += ms;
            let sample = Self::sample_for(&self.held, self.phase);
            self.session.poll(&sample, self.now).into_iter().collect()
        }

        fn wait(&mut self, ms: u32) -> std::vec::Vec<Update> {
            let mut all = std::vec::Vec::new();
            for _ in 0..ms {
                all.extend(self.tick(1));
            }
            all
        }

        fn turn_cw(&mut self) -> std::vec::Vec<Update> {
            let mut all = std::vec::Vec::new();
            for _ in 0..4 {
                self.phase = (self.phase + 1) % 4;
                all.extend(self.tick(1));
            }
            all
        }

        fn click(&mut self) -> std::vec::Vec<Update> {
            self.held.push(LogicalInput::EncoderPush);
            let mut all = self.wait(50);
            self.held.retain(|input| *input != LogicalInput::EncoderPush);
            all.extend(self.wait(50));
            all
        }
    }

    #[test]
    fn test_turn_moves_between_roots() {
        let mut rig = Rig::new();
        let updates = rig.turn_cw();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].node, ids::LEDS);
        assert_eq!(updates[0].redraw, Redraw::Enter);
    }

    #[test]
    fn test_edit_and_commit_led_brightness() {
        let mut rig = Rig::new();
        rig.turn_cw();
        let entered = rig.click();
        assert_eq!(entered.len(), 1);
        assert_eq!(entered[0].node, ids::LED_BRIGHTNESS);

        rig.turn_cw();
        rig.turn_cw();
        assert_eq!(rig.session.store().get(Setting::LedBrightness), 10);

        let back = rig.click();
        assert_eq!(back[0].node, ids::LEDS);
        assert_eq!(rig.session.store().get(Setting::LedBrightness), 12);
    }

    #[test]
    fn test_mirror_long_press_resets_to_battery() {
        let mut rig = Rig::new();
        rig.turn_cw();
        rig.click();
        assert!(rig.session.is_detail());

        rig.held.push(LogicalInput::Mirror);
        let updates = rig.wait(1100);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].node, ids::BATTERY);
        assert!(!rig.session.is_detail());

        // Abandoned edit leaves the store untouched
        assert_eq!(rig.session.store().get(Setting::LedBrightness), 10);
    }

    #[test]
    fn test_toggle_repeat_steps_editor() {
        let mut rig = Rig::new();
        rig.turn_cw();
        rig.click();

        rig.held.push(LogicalInput::ToggleDown);
        let updates = rig.wait(900);
        // Press, first repeat at 800 ms, one more at 860 ms
        assert_eq!(updates.len(), 3);
        assert!(matches!(
            updates.last().unwrap().view,
            View::Level { value: 7, .. }
        ));
    }

    #[test]
    fn test_commit_cancels_toggle_repeat() {
        let mut rig = Rig::new();
        rig.turn_cw();
        rig.click();

        rig.held.push(LogicalInput::ToggleUp);
        rig.wait(100);
        rig.click();
        assert!(!rig.session.is_detail());

        // Still holding the toggle: no further steps through the root cycle
        let updates = rig.wait(2000);
        assert!(updates.is_empty());
    }

    #[test]
    fn test_battery_refresh() {
        let mut rig = Rig::new();
        let same = rig.session.battery();
        assert_eq!(rig.session.set_battery(same), None);

        let update = rig
            .session
            .set_battery(BatteryStatus {
                percent: 63,
                charging: false,
            })
            .unwrap();
        assert_eq!(update.redraw, Redraw::Value);

        rig.turn_cw();
        assert_eq!(rig.session.set_battery(BatteryStatus::default()), None);
    }

    #[test]
    fn test_stomp_edges_do_not_touch_menu() {
        let mut rig = Rig::new();
        rig.held.push(LogicalInput::Stomp2);
        assert!(rig.wait(100).is_empty());
        assert_eq!(rig.session.current(), Some(ids::BATTERY));
    }
}
