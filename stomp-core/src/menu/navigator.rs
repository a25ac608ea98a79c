//! Menu navigator
//!
//! Owns a registry of nodes and the current position. Root nodes form a
//! single cycle in registration order; each root may own one detail node.
//!
//! | position | turn / toggle           | press                       |
//! |----------|-------------------------|-----------------------------|
//! | root     | next / previous root    | enter the detail, if any    |
//! | detail   | forwarded to the node   | node decides: stay or done  |
//!
//! Every call that changes what is on screen returns an [`Update`].

use heapless::Vec;

use crate::input::Direction;

use super::node::{MenuNode, NodeId, NodeKind, PressOutcome};
use super::view::View;

/// Errors from building a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Registry capacity exhausted
    Full,
    /// Node id already registered
    DuplicateNode(NodeId),
    /// Parent id not registered
    UnknownParent(NodeId),
    /// Parent is itself a detail node
    ParentNotRoot(NodeId),
    /// Parent already has a detail node
    DetailTaken(NodeId),
    /// No root nodes registered
    Empty,
}

/// How much of the screen an update touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Redraw {
    /// A different node is now active; draw its whole body
    Enter,
    /// Same node; only its value changed
    Value,
}

/// What changed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Update {
    /// Active node after the change
    pub node: NodeId,
    /// Whether the active node is a detail node
    pub detail: bool,
    pub redraw: Redraw,
    pub view: View,
}

struct Entry<N> {
    id: NodeId,
    kind: NodeKind,
    node: N,
    detail: Option<usize>,
}

/// Menu state machine over nodes of type `N`, holding up to `MAX` nodes
pub struct Navigator<N, const MAX: usize> {
    entries: Vec<Entry<N>, MAX>,
    /// Entry indices of root nodes, in cycle order
    roots: Vec<usize, MAX>,
    /// Entry index of the active node
    current: usize,
    /// Position in `roots` of the active node or of its parent
    root_pos: usize,
}

impl<N, const MAX: usize> Default for Navigator<N, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const MAX: usize> Navigator<N, MAX> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            roots: Vec::new(),
            current: 0,
            root_pos: 0,
        }
    }

    /// Append a node to the root cycle
    pub fn register_root(&mut self, id: NodeId, node: N) -> Result<(), MenuError> {
        if self.find(id).is_some() {
            return Err(MenuError::DuplicateNode(id));
        }
        let index = self.entries.len();
        self.entries
            .push(Entry {
                id,
                kind: NodeKind::Root,
                node,
                detail: None,
            })
            .map_err(|_| MenuError::Full)?;
        self.roots.push(index).map_err(|_| MenuError::Full)
    }

    /// Attach a detail node to a registered root
    pub fn register_detail(&mut self, id: NodeId, parent: NodeId, node: N) -> Result<(), MenuError> {
        if self.find(id).is_some() {
            return Err(MenuError::DuplicateNode(id));
        }
        let parent_index = self.find(parent).ok_or(MenuError::UnknownParent(parent))?;
        let parent_entry = &self.entries[parent_index];
        if parent_entry.kind != NodeKind::Root {
            return Err(MenuError::ParentNotRoot(parent));
        }
        if parent_entry.detail.is_some() {
            return Err(MenuError::DetailTaken(parent));
        }

        let index = self.entries.len();
        self.entries
            .push(Entry {
                id,
                kind: NodeKind::Detail { parent },
                node,
                detail: None,
            })
            .map_err(|_| MenuError::Full)?;
        self.entries[parent_index].detail = Some(index);
        Ok(())
    }

    /// Active node id
    pub fn current(&self) -> Option<NodeId> {
        self.entries.get(self.current).map(|entry| entry.id)
    }

    /// Whether the active node is a detail node
    pub fn is_detail(&self) -> bool {
        self.entries
            .get(self.current)
            .is_some_and(|entry| matches!(entry.kind, NodeKind::Detail { .. }))
    }

    /// Number of nodes in the root cycle
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Kind of a registered node
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.find(id).map(|index| self.entries[index].kind)
    }

    /// Mutable access to a registered node
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        let index = self.find(id)?;
        Some(&mut self.entries[index].node)
    }

    fn find(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn update(&self, redraw: Redraw, view: View) -> Update {
        let entry = &self.entries[self.current];
        Update {
            node: entry.id,
            detail: matches!(entry.kind, NodeKind::Detail { .. }),
            redraw,
            view,
        }
    }
}

impl<N, const MAX: usize> Navigator<N, MAX> {
    /// Start at the first root; fails if nothing is registered
    pub fn begin<C>(&mut self, ctx: &mut C) -> Result<Update, MenuError>
    where
        N: MenuNode<C>,
    {
        self.reset(ctx).ok_or(MenuError::Empty)
    }

    /// Reset every node and return to the first root
    pub fn reset<C>(&mut self, ctx: &mut C) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        for entry in self.entries.iter_mut() {
            MenuNode::<C>::reset(&mut entry.node);
        }
        self.go_root(ctx, 0)
    }

    /// Move to the next root
    pub fn next<C>(&mut self, ctx: &mut C) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        let count = self.roots.len();
        if count == 0 {
            return None;
        }
        self.go_root(ctx, (self.root_pos + 1) % count)
    }

    /// Move to the previous root
    pub fn prev<C>(&mut self, ctx: &mut C) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        let count = self.roots.len();
        if count == 0 {
            return None;
        }
        self.go_root(ctx, (self.root_pos + count - 1) % count)
    }

    /// Encoder detent
    pub fn on_turn<C>(&mut self, ctx: &mut C, direction: Direction) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        if self.is_detail() {
            let view = self.entries[self.current].node.on_turn(ctx, direction)?;
            return Some(self.update(Redraw::Value, view));
        }
        self.step(ctx, direction)
    }

    /// Toggle event; behaves like a turn unless the detail node overrides it
    pub fn on_toggle<C>(&mut self, ctx: &mut C, direction: Direction) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        if self.is_detail() {
            let view = self.entries[self.current].node.on_toggle(ctx, direction)?;
            return Some(self.update(Redraw::Value, view));
        }
        self.step(ctx, direction)
    }

    /// Encoder press
    pub fn on_press<C>(&mut self, ctx: &mut C) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        let entry = self.entries.get_mut(self.current)?;
        match entry.kind {
            NodeKind::Root => {
                let detail = entry.detail?;
                self.enter(ctx, detail)
            }
            NodeKind::Detail { parent } => match entry.node.on_press(ctx) {
                PressOutcome::Stay(view) => Some(self.update(Redraw::Value, view)),
                PressOutcome::Done => {
                    debug!("menu: node {} done, back to {}", entry.id.0, parent.0);
                    let parent = self.find(parent)?;
                    self.enter(ctx, parent)
                }
            },
        }
    }

    /// Give the active node a chance to report changed data
    pub fn refresh<C>(&mut self, ctx: &mut C) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        let entry = self.entries.get_mut(self.current)?;
        let view = entry.node.refresh(ctx)?;
        Some(self.update(Redraw::Value, view))
    }

    fn step<C>(&mut self, ctx: &mut C, direction: Direction) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        match direction {
            Direction::Cw => self.next(ctx),
            Direction::Ccw => self.prev(ctx),
        }
    }

    fn go_root<C>(&mut self, ctx: &mut C, position: usize) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        let index = *self.roots.get(position)?;
        self.root_pos = position;
        self.enter(ctx, index)
    }

    fn enter<C>(&mut self, ctx: &mut C, index: usize) -> Option<Update>
    where
        N: MenuNode<C>,
    {
        let entry = self.entries.get_mut(index)?;
        let view = entry.node.enter(ctx);
        debug!("menu: enter node {}", entry.id.0);
        self.current = index;
        Some(self.update(Redraw::Enter, view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls; detail nodes count a value and save it on press
    #[derive(Default)]
    struct TestNode {
        entered: u32,
        resets: u32,
        value: u8,
        toggle_override: bool,
    }

    #[derive(Default)]
    struct Ctx {
        saved: std::vec::Vec<u8>,
    }

    impl MenuNode<Ctx> for TestNode {
        fn enter(&mut self, _ctx: &mut Ctx) -> View {
            self.entered += 1;
            View::MirrorDelay {
                tenths: self.value,
                editing: false,
            }
        }

        fn on_turn(&mut self, _ctx: &mut Ctx, direction: Direction) -> Option<View> {
            self.value = (self.value as i16 + direction.delta()) as u8;
            Some(View::MirrorDelay {
                tenths: self.value,
                editing: true,
            })
        }

        fn on_toggle(&mut self, ctx: &mut Ctx, direction: Direction) -> Option<View> {
            if self.toggle_override {
                self.value += 10;
                return Some(View::MirrorDelay {
                    tenths: self.value,
                    editing: true,
                });
            }
            self.on_turn(ctx, direction)
        }

        fn on_press(&mut self, ctx: &mut Ctx) -> PressOutcome {
            ctx.saved.push(self.value);
            PressOutcome::Done
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn menu() -> Navigator<TestNode, 8> {
        let mut nav = Navigator::new();
        nav.register_root(NodeId(0), TestNode::default()).unwrap();
        nav.register_root(NodeId(1), TestNode::default()).unwrap();
        nav.register_detail(NodeId(2), NodeId(1), TestNode::default()).unwrap();
        nav.register_root(NodeId(3), TestNode::default()).unwrap();
        nav
    }

    #[test]
    fn test_begin_enters_first_root() {
        let mut nav = menu();
        let update = nav.begin(&mut Ctx::default()).unwrap();
        assert_eq!(update.node, NodeId(0));
        assert_eq!(update.redraw, Redraw::Enter);
        assert!(!update.detail);
    }

    #[test]
    fn test_begin_on_empty_menu() {
        let mut nav: Navigator<TestNode, 4> = Navigator::new();
        assert_eq!(nav.begin(&mut Ctx::default()), Err(MenuError::Empty));
        assert_eq!(nav.on_press(&mut Ctx::default()), None);
        assert_eq!(nav.on_turn(&mut Ctx::default(), Direction::Cw), None);
    }

    #[test]
    fn test_turn_cycles_roots_and_skips_details() {
        let mut nav = menu();
        let mut ctx = Ctx::default();
        nav.begin(&mut ctx).unwrap();

        let order: std::vec::Vec<u8> = (0..4)
            .map(|_| nav.on_turn(&mut ctx, Direction::Cw).unwrap().node.0)
            .collect();
        assert_eq!(order, vec![1, 3, 0, 1]);

        let order: std::vec::Vec<u8> = (0..3)
            .map(|_| nav.on_turn(&mut ctx, Direction::Ccw).unwrap().node.0)
            .collect();
        assert_eq!(order, vec![0, 3, 1]);
    }

    #[test]
    fn test_press_on_root_without_detail_does_nothing() {
        let mut nav = menu();
        let mut ctx = Ctx::default();
        nav.begin(&mut ctx).unwrap();
        assert_eq!(nav.on_press(&mut ctx), None);
        assert_eq!(nav.current(), Some(NodeId(0)));
    }

    #[test]
    fn test_detail_round_trip_saves_once() {
        let mut nav = menu();
        let mut ctx = Ctx::default();
        nav.begin(&mut ctx).unwrap();
        nav.next(&mut ctx).unwrap();

        let entered = nav.on_press(&mut ctx).unwrap();
        assert_eq!(entered.node, NodeId(2));
        assert!(entered.detail);

        for _ in 0..5 {
            let update = nav.on_turn(&mut ctx, Direction::Cw).unwrap();
            assert_eq!(update.redraw, Redraw::Value);
            assert_eq!(update.node, NodeId(2));
        }
        nav.on_turn(&mut ctx, Direction::Ccw).unwrap();
        assert!(ctx.saved.is_empty());

        let back = nav.on_press(&mut ctx).unwrap();
        assert_eq!(back.node, NodeId(1));
        assert_eq!(back.redraw, Redraw::Enter);
        assert_eq!(ctx.saved, vec![4]);
    }

    #[test]
    fn test_toggle_override_in_detail() {
        let mut nav = menu();
        let mut ctx = Ctx::default();
        nav.begin(&mut ctx).unwrap();
        nav.next(&mut ctx).unwrap();
        nav.node_mut(NodeId(2)).unwrap().toggle_override = true;
        nav.on_press(&mut ctx).unwrap();

        let update = nav.on_toggle(&mut ctx, Direction::Cw).unwrap();
        assert_eq!(
            update.view,
            View::MirrorDelay {
                tenths: 10,
                editing: true
            }
        );
    }

    #[test]
    fn test_toggle_at_root_navigates() {
        let mut nav = menu();
        let mut ctx = Ctx::default();
        nav.begin(&mut ctx).unwrap();
        assert_eq!(nav.on_toggle(&mut ctx, Direction::Ccw).unwrap().node, NodeId(3));
    }

    #[test]
    fn test_reset_from_detail_returns_to_first_root() {
        let mut nav = menu();
        let mut ctx = Ctx::default();
        nav.begin(&mut ctx).unwrap();
        nav.next(&mut ctx).unwrap();
        nav.on_press(&mut ctx).unwrap();
        assert!(nav.is_detail());

        let update = nav.reset(&mut ctx).unwrap();
        assert_eq!(update.node, NodeId(0));
        assert!(!nav.is_detail());
        assert!(ctx.saved.is_empty());
        assert_eq!(nav.node_mut(NodeId(2)).unwrap().resets, 2);
    }

    #[test]
    fn test_registration_errors() {
        let mut nav: Navigator<TestNode, 3> = Navigator::new();
        nav.register_root(NodeId(0), TestNode::default()).unwrap();
        assert_eq!(
            nav.register_root(NodeId(0), TestNode::default()),
            Err(MenuError::DuplicateNode(NodeId(0)))
        );
        assert_eq!(
            nav.register_detail(NodeId(1), NodeId(9), TestNode::default()),
            Err(MenuError::UnknownParent(NodeId(9)))
        );
        nav.register_detail(NodeId(1), NodeId(0), TestNode::default()).unwrap();
        assert_eq!(
            nav.register_detail(NodeId(2), NodeId(0), TestNode::default()),
            Err(MenuError::DetailTaken(NodeId(0)))
        );
        assert_eq!(
            nav.register_detail(NodeId(2), NodeId(1), TestNode::default()),
            Err(MenuError::ParentNotRoot(NodeId(1)))
        );
        nav.register_root(NodeId(2), TestNode::default()).unwrap();
        assert_eq!(
            nav.register_root(NodeId(3), TestNode::default()),
            Err(MenuError::Full)
        );
    }
}
