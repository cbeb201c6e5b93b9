//! Visual-state resolution.
//!
//! A node's presentation state is derived on demand from the tree-wide hover
//! and focus singletons, the node's effective enablement and its pressed flag.
//! Explicit overrides short-circuit the computation.

use crate::{
    NodeId,
    core::{notify::Change, tree::Tree},
    error::{Error, Result},
};

/// Primary presentation state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// None of the below.
    #[default]
    Normal,
    /// The pointer is over the node.
    Hovered,
    /// A mouse button is held on the node.
    Pressed,
    /// The node has focus.
    Focused,
    /// The node is not effectively enabled.
    Disabled,
}

/// All states that apply to a node at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualStates {
    /// Not effectively enabled.
    pub disabled: bool,
    /// A mouse button is held on the node.
    pub pressed: bool,
    /// The pointer is over the node.
    pub hovered: bool,
    /// The node has focus.
    pub focused: bool,
}

impl VisualStates {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy with `state` added.
    pub fn with(mut self, state: VisualState) -> Self {
        self.insert(state);
        self
    }

    /// Add `state`. `Normal` adds nothing.
    pub fn insert(&mut self, state: VisualState) {
        match state {
            VisualState::Normal => {}
            VisualState::Hovered => self.hovered = true,
            VisualState::Pressed => self.pressed = true,
            VisualState::Focused => self.focused = true,
            VisualState::Disabled => self.disabled = true,
        }
    }

    /// Is `state` in the set? `Normal` is contained only in the empty set.
    pub fn contains(&self, state: VisualState) -> bool {
        match state {
            VisualState::Normal => self.is_empty(),
            VisualState::Hovered => self.hovered,
            VisualState::Pressed => self.pressed,
            VisualState::Focused => self.focused,
            VisualState::Disabled => self.disabled,
        }
    }

    /// True if no state applies.
    pub fn is_empty(&self) -> bool {
        !(self.disabled || self.pressed || self.hovered || self.focused)
    }

    /// The highest-priority member: disabled, then pressed, hovered, focused.
    pub fn primary(&self) -> VisualState {
        if self.disabled {
            VisualState::Disabled
        } else if self.pressed {
            VisualState::Pressed
        } else if self.hovered {
            VisualState::Hovered
        } else if self.focused {
            VisualState::Focused
        } else {
            VisualState::Normal
        }
    }
}

/// Query and drive visual state.
pub trait VisualStateResolver {
    /// The primary visual state: the override if one is set, otherwise the
    /// highest priority member of [`visual_states`](Self::visual_states).
    fn visual_state(&self, node: NodeId) -> VisualState;

    /// Every state that applies, or the set override if one is set.
    fn visual_states(&self, node: NodeId) -> VisualStates;

    /// Force the primary state of a node. `None` restores computation.
    fn set_visual_state_override(&mut self, node: NodeId, state: Option<VisualState>)
    -> Result<()>;

    /// Force the state set of a node. `None` restores computation.
    fn set_visual_states_override(
        &mut self,
        node: NodeId,
        states: Option<VisualStates>,
    ) -> Result<()>;

    /// The hovered node.
    fn hovered(&self) -> Option<NodeId>;

    /// Move hover to `node`, or clear it. Only attached nodes can be hovered.
    fn set_hovered(&mut self, node: Option<NodeId>) -> Result<()>;

    /// Mark a mouse button as held or released on `node`.
    fn set_pressed(&mut self, node: NodeId, pressed: bool) -> Result<()>;

    /// Is a mouse button held on `node`?
    fn is_pressed(&self, node: NodeId) -> bool;
}

/// States derived from the tree, ignoring overrides.
fn computed(tree: &Tree, node: NodeId) -> VisualStates {
    VisualStates {
        disabled: !tree.is_effectively_enabled(node),
        pressed: tree.node(node).is_some_and(|n| n.pressed),
        hovered: tree.hovered == Some(node),
        focused: tree.focus == Some(node),
    }
}

/// Run `f` and report `VisualStateChanged` for each of `nodes` whose primary
/// state differs afterwards.
pub(crate) fn track_visual<R>(
    tree: &mut Tree,
    nodes: &[NodeId],
    f: impl FnOnce(&mut Tree) -> R,
) -> R {
    let before: Vec<(NodeId, VisualState)> = nodes
        .iter()
        .filter(|n| tree.contains(**n))
        .map(|n| (*n, tree.visual_state(*n)))
        .collect();
    let out = f(tree);
    for (node, old) in before {
        if !tree.contains(node) {
            continue;
        }
        let new = tree.visual_state(node);
        if new != old {
            tree.emit(Change::VisualStateChanged { node, old, new });
        }
    }
    out
}

impl VisualStateResolver for Tree {
    fn visual_state(&self, node: NodeId) -> VisualState {
        match self.node(node) {
            Some(n) => n
                .visual_state_override
                .unwrap_or_else(|| self.visual_states(node).primary()),
            None => VisualState::Normal,
        }
    }

    fn visual_states(&self, node: NodeId) -> VisualStates {
        match self.node(node) {
            Some(n) => n
                .visual_states_override
                .unwrap_or_else(|| computed(self, node)),
            None => VisualStates::new(),
        }
    }

    fn set_visual_state_override(
        &mut self,
        node: NodeId,
        state: Option<VisualState>,
    ) -> Result<()> {
        self.get(node)?;
        track_visual(self, &[node], |t| {
            if let Some(n) = t.nodes.get_mut(node) {
                n.visual_state_override = state;
            }
        });
        Ok(())
    }

    fn set_visual_states_override(
        &mut self,
        node: NodeId,
        states: Option<VisualStates>,
    ) -> Result<()> {
        self.get(node)?;
        track_visual(self, &[node], |t| {
            if let Some(n) = t.nodes.get_mut(node) {
                n.visual_states_override = states;
            }
        });
        Ok(())
    }

    fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    fn set_hovered(&mut self, node: Option<NodeId>) -> Result<()> {
        if let Some(n) = node {
            self.get(n)?;
            if !self.is_attached_to_root(n) {
                return Err(Error::InvalidOperation(format!(
                    "cannot hover detached node {n:?}"
                )));
            }
        }
        let old = self.hovered;
        if old == node {
            return Ok(());
        }
        let affected: Vec<NodeId> = old.into_iter().chain(node).collect();
        track_visual(self, &affected, |t| t.hovered = node);
        self.emit(Change::HoveredChanged { old, new: node });
        Ok(())
    }

    fn set_pressed(&mut self, node: NodeId, pressed: bool) -> Result<()> {
        if self.get(node)?.pressed == pressed {
            return Ok(());
        }
        track_visual(self, &[node], |t| {
            if let Some(n) = t.nodes.get_mut(node) {
                n.pressed = pressed;
            }
        });
        Ok(())
    }

    fn is_pressed(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.pressed)
    }
}
