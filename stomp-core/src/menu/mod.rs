//! Setup menu
//!
//! A generic [`Navigator`] over [`MenuNode`] implementations, plus the
//! concrete setup screens in [`screens`].

pub mod navigator;
pub mod node;
pub mod screens;
pub mod view;

pub use navigator::{MenuError, Navigator, Redraw, Update};
pub use node::{MenuNode, NodeId, NodeKind, PressOutcome};
pub use screens::{ids, setup_menu, SetupContext, SetupMenu, SetupNode};
pub use view::{CcBank, EditStage, LevelTarget, MidiPort, View};
