//! Setup screens
//!
//! The concrete nodes of the setup menu. Roots show a value; their detail
//! node edits it and writes it to the store on the final press.
//!
//! ```text
//! Battery ─ LEDs ─ Display ─ MIDI ─ Fader CCs ─ Stomp CCs ─ Mirror ─┐
//!    ▲        │       │        │        │           │          │      │
//!    │      edit    edit     edit     edit        edit       edit     │
//!    └─────────────────────────────────────────────────────────────────┘
//! ```

mod battery;
mod cc;
mod level;
mod midi;
mod mirror;

pub use battery::BatteryScreen;
pub use cc::{CcEditor, CcOverview};
pub use level::{LevelEditor, LevelOverview};
pub use midi::{MidiChannelEditor, MidiChannelsOverview};
pub use mirror::{MirrorDelayEditor, MirrorDelayOverview};

use core::ops::RangeInclusive;

use crate::battery::BatteryStatus;
use crate::input::Direction;
use crate::settings::SettingsStore;

use super::navigator::{MenuError, Navigator};
use super::node::{MenuNode, NodeId, PressOutcome};
use super::view::{CcBank, LevelTarget, View};

/// Registry capacity of the setup menu
pub const MENU_CAPACITY: usize = 16;

/// The setup menu navigator
pub type SetupMenu = Navigator<SetupNode, MENU_CAPACITY>;

/// Node ids of the setup menu
pub mod ids {
    use super::NodeId;

    pub const BATTERY: NodeId = NodeId(0);
    pub const LEDS: NodeId = NodeId(1);
    pub const LED_BRIGHTNESS: NodeId = NodeId(2);
    pub const DISPLAY: NodeId = NodeId(3);
    pub const DISPLAY_BRIGHTNESS: NodeId = NodeId(4);
    pub const MIDI: NodeId = NodeId(5);
    pub const MIDI_EDIT: NodeId = NodeId(6);
    pub const FADER_CC: NodeId = NodeId(7);
    pub const FADER_CC_EDIT: NodeId = NodeId(8);
    pub const STOMP_CC: NodeId = NodeId(9);
    pub const STOMP_CC_EDIT: NodeId = NodeId(10);
    pub const MIRROR: NodeId = NodeId(11);
    pub const MIRROR_EDIT: NodeId = NodeId(12);
}

/// What setup screens read and write
pub struct SetupContext<S> {
    pub store: S,
    pub battery: BatteryStatus,
}

impl<S: SettingsStore> SetupContext<S> {
    pub fn new(store: S, battery: BatteryStatus) -> Self {
        Self { store, battery }
    }
}

/// Any setup screen
pub enum SetupNode {
    Battery(BatteryScreen),
    LevelOverview(LevelOverview),
    LevelEditor(LevelEditor),
    MidiOverview(MidiChannelsOverview),
    MidiEditor(MidiChannelEditor),
    CcOverview(CcOverview),
    CcEditor(CcEditor),
    MirrorOverview(MirrorDelayOverview),
    MirrorEditor(MirrorDelayEditor),
}

macro_rules! dispatch {
    ($self:ident, $node:ident => $call:expr) => {
        match $self {
            SetupNode::Battery($node) => $call,
            SetupNode::LevelOverview($node) => $call,
            SetupNode::LevelEditor($node) => $call,
            SetupNode::MidiOverview($node) => $call,
            SetupNode::MidiEditor($node) => $call,
            SetupNode::CcOverview($node) => $call,
            SetupNode::CcEditor($node) => $call,
            SetupNode::MirrorOverview($node) => $call,
            SetupNode::MirrorEditor($node) => $call,
        }
    };
}

impl<S: SettingsStore> MenuNode<SetupContext<S>> for SetupNode {
    fn enter(&mut self, ctx: &mut SetupContext<S>) -> View {
        dispatch!(self, node => node.enter(ctx))
    }

    fn on_turn(&mut self, ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        dispatch!(self, node => node.on_turn(ctx, direction))
    }

    fn on_toggle(&mut self, ctx: &mut SetupContext<S>, direction: Direction) -> Option<View> {
        dispatch!(self, node => node.on_toggle(ctx, direction))
    }

    fn on_press(&mut self, ctx: &mut SetupContext<S>) -> PressOutcome {
        dispatch!(self, node => node.on_press(ctx))
    }

    fn refresh(&mut self, ctx: &mut SetupContext<S>) -> Option<View> {
        dispatch!(self, node => node.refresh(ctx))
    }

    fn reset(&mut self) {
        dispatch!(self, node => MenuNode::<SetupContext<S>>::reset(node))
    }
}

/// Build the setup menu
pub fn setup_menu() -> Result<SetupMenu, MenuError> {
    let mut menu = SetupMenu::new();

    menu.register_root(ids::BATTERY, SetupNode::Battery(BatteryScreen::new()))?;

    menu.register_root(ids::LEDS, SetupNode::LevelOverview(LevelOverview::new(LevelTarget::Led)))?;
    menu.register_detail(
        ids::LED_BRIGHTNESS,
        ids::LEDS,
        SetupNode::LevelEditor(LevelEditor::new(LevelTarget::Led)),
    )?;

    menu.register_root(ids::DISPLAY, SetupNode::LevelOverview(LevelOverview::new(LevelTarget::Tft)))?;
    menu.register_detail(
        ids::DISPLAY_BRIGHTNESS,
        ids::DISPLAY,
        SetupNode::LevelEditor(LevelEditor::new(LevelTarget::Tft)),
    )?;

    menu.register_root(ids::MIDI, SetupNode::MidiOverview(MidiChannelsOverview))?;
    menu.register_detail(ids::MIDI_EDIT, ids::MIDI, SetupNode::MidiEditor(MidiChannelEditor::new()))?;

    menu.register_root(ids::FADER_CC, SetupNode::CcOverview(CcOverview::new(CcBank::Fader)))?;
    menu.register_detail(
        ids::FADER_CC_EDIT,
        ids::FADER_CC,
        SetupNode::CcEditor(CcEditor::new(CcBank::Fader)),
    )?;

    menu.register_root(ids::STOMP_CC, SetupNode::CcOverview(CcOverview::new(CcBank::Stomp)))?;
    menu.register_detail(
        ids::STOMP_CC_EDIT,
        ids::STOMP_CC,
        SetupNode::CcEditor(CcEditor::new(CcBank::Stomp)),
    )?;

    menu.register_root(ids::MIRROR, SetupNode::MirrorOverview(MirrorDelayOverview))?;
    menu.register_detail(ids::MIRROR_EDIT, ids::MIRROR, SetupNode::MirrorEditor(MirrorDelayEditor::new()))?;

    Ok(menu)
}

/// Step within `range`, stopping at the ends
pub(crate) fn step_clamped(value: u8, delta: i16, range: RangeInclusive<u8>) -> u8 {
    let stepped = i16::from(value) + delta;
    stepped.clamp(i16::from(*range.start()), i16::from(*range.end())) as u8
}

/// Step within `range`, wrapping past either end
pub(crate) fn step_wrapped(value: u8, delta: i16, range: RangeInclusive<u8>) -> u8 {
    let start = i16::from(*range.start());
    let span = i16::from(*range.end()) - start + 1;
    let offset = (i16::from(value) - start + delta).rem_euclid(span);
    (start + offset) as u8
}
