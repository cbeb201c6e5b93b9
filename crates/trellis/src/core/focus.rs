use tracing::trace;

use crate::{
    NodeId,
    core::{notify::Change, tree::Tree, visual::track_visual},
    error::Result,
};

/// Focus and tab-order traversal.
pub trait FocusManager {
    /// The focused node.
    fn focused(&self) -> Option<NodeId>;

    /// Does the node have focus?
    fn is_focused(&self, node: NodeId) -> bool;

    /// Incremented on every focus change.
    fn focus_generation(&self) -> u64;

    /// Can the node take focus? It must be attached, visible along with all its
    /// ancestors, effectively enabled and selectable.
    fn is_focusable(&self, node: NodeId) -> bool;

    /// Focus a node. Returns `true` if focus changed; unfocusable nodes are
    /// refused with `false`.
    fn set_focus(&mut self, node: NodeId) -> Result<bool>;

    /// Drop focus. Returns `true` if a node had focus.
    fn clear_focus(&mut self) -> bool;

    /// Focusable tab stops under `scope` in tab order. With `nested`, the whole
    /// subtree is walked in pre-order; otherwise only direct children.
    /// Siblings are ordered by tab index, ties in child order.
    fn focusable_nodes(&self, scope: NodeId, nested: bool) -> Vec<NodeId>;

    /// Focus the first tab stop under `scope`.
    fn focus_first(&mut self, scope: NodeId) -> Result<Option<NodeId>>;

    /// The tab stop after (or before) `from`, wrapping around. With `nested`
    /// the sequence is the whole tree containing `from`; otherwise it is
    /// `from`'s siblings. If `from` is not in the sequence, forward gives the
    /// first stop and backward the last.
    fn next_focusable(&self, from: NodeId, forward: bool, nested: bool) -> Option<NodeId>;

    /// Move focus to `next_focusable` and return it.
    fn focus_next(&mut self, from: NodeId, forward: bool, nested: bool) -> Result<Option<NodeId>>;

    /// Clear focus if the focused node no longer qualifies.
    fn ensure_focus_valid(&mut self);
}

/// Children of `node` in tab order.
fn tab_children(tree: &Tree, node: NodeId) -> Vec<NodeId> {
    let mut children = tree.children(node).to_vec();
    children.sort_by_key(|c| tree.node(*c).map_or(0, |n| n.tab_index()));
    children
}

/// Is `node` a focusable tab stop?
fn is_tab_stop(tree: &Tree, node: NodeId) -> bool {
    tree.node(node).is_some_and(|n| n.tab_stop()) && tree.is_focusable(node)
}

impl FocusManager for Tree {
    fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    fn is_focused(&self, node: NodeId) -> bool {
        self.focus == Some(node)
    }

    fn focus_generation(&self) -> u64 {
        self.focus_gen
    }

    fn is_focusable(&self, node: NodeId) -> bool {
        self.node(node)
            .is_some_and(|n| n.can_select() && !n.disposing)
            && self.is_attached_to_root(node)
            && self.is_effectively_visible(node)
            && self.is_effectively_enabled(node)
    }

    fn set_focus(&mut self, node: NodeId) -> Result<bool> {
        self.get(node)?;
        if self.focus == Some(node) || !self.is_focusable(node) {
            return Ok(false);
        }
        let old = self.focus;
        let affected: Vec<NodeId> = old.into_iter().chain(Some(node)).collect();
        track_visual(self, &affected, |t| {
            t.focus = Some(node);
            t.focus_gen = t.focus_gen.saturating_add(1);
        });
        trace!(?old, new = ?node, "focus");
        self.emit(Change::FocusChanged {
            old,
            new: Some(node),
        });
        Ok(true)
    }

    fn clear_focus(&mut self) -> bool {
        let Some(old) = self.focus else {
            return false;
        };
        track_visual(self, &[old], |t| {
            t.focus = None;
            t.focus_gen = t.focus_gen.saturating_add(1);
        });
        self.emit(Change::FocusChanged {
            old: Some(old),
            new: None,
        });
        true
    }

    fn focusable_nodes(&self, scope: NodeId, nested: bool) -> Vec<NodeId> {
        if !nested {
            return tab_children(self, scope)
                .into_iter()
                .filter(|c| is_tab_stop(self, *c))
                .collect();
        }
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = tab_children(self, scope).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            if !self.is_visible(id) {
                continue;
            }
            if is_tab_stop(self, id) {
                out.push(id);
            }
            stack.extend(tab_children(self, id).into_iter().rev());
        }
        out
    }

    fn focus_first(&mut self, scope: NodeId) -> Result<Option<NodeId>> {
        self.get(scope)?;
        let target = self.focusable_nodes(scope, true).first().copied();
        if let Some(t) = target {
            self.set_focus(t)?;
        }
        Ok(target)
    }

    fn next_focusable(&self, from: NodeId, forward: bool, nested: bool) -> Option<NodeId> {
        let scope = if nested {
            self.all_parents(from).last().unwrap_or(from)
        } else {
            self.parent(from).unwrap_or(from)
        };
        let order = self.focusable_nodes(scope, nested);
        let len = order.len();
        if len == 0 {
            return None;
        }
        let next = match order.iter().position(|n| *n == from) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(order[next])
    }

    fn focus_next(&mut self, from: NodeId, forward: bool, nested: bool) -> Result<Option<NodeId>> {
        self.get(from)?;
        let target = self.next_focusable(from, forward, nested);
        if let Some(t) = target {
            self.set_focus(t)?;
        }
        Ok(target)
    }

    fn ensure_focus_valid(&mut self) {
        if let Some(f) = self.focus
            && !self.is_focusable(f)
        {
            self.clear_focus();
        }
    }
}
