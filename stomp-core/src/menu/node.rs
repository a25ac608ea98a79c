//! Menu node capabilities

use crate::input::Direction;

use super::view::View;

/// Stable menu node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId(pub u8);

/// Position of a node in the menu tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeKind {
    /// Part of the top-level cycle
    Root,
    /// Entered from `parent` by a press; consumes rotation for editing
    Detail { parent: NodeId },
}

/// What a detail node wants after a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// Stay on this node (e.g. advance to the next editor stage)
    Stay(View),
    /// Edit confirmed and saved; return to the parent
    Done,
}

/// Behaviour of one menu node
///
/// `C` is the context handed to every call, typically the settings store
/// and live status. Only [`MenuNode::enter`] is mandatory.
pub trait MenuNode<C> {
    /// Load state and describe the full screen body
    fn enter(&mut self, ctx: &mut C) -> View;

    /// Encoder detent while this node is an active detail
    fn on_turn(&mut self, _ctx: &mut C, _direction: Direction) -> Option<View> {
        None
    }

    /// Toggle event while this node is an active detail
    fn on_toggle(&mut self, ctx: &mut C, direction: Direction) -> Option<View> {
        self.on_turn(ctx, direction)
    }

    /// Encoder press while this node is an active detail
    ///
    /// A node returning [`PressOutcome::Done`] has already written its
    /// value to the store.
    fn on_press(&mut self, _ctx: &mut C) -> PressOutcome {
        PressOutcome::Done
    }

    /// Periodic check for externally changed data
    fn refresh(&mut self, _ctx: &mut C) -> Option<View> {
        None
    }

    /// Drop any per-visit state
    fn reset(&mut self) {}
}
