//! Event bubbling.
//!
//! An event starts at a target node and climbs towards the root until some
//! handler stops it. The topmost previewing node on the path sees the event
//! first and can stop it before any descendant does. With `root_preview`
//! set the tree root previews whenever the path reaches it. A path that ends
//! at the top of a detached subtree falls back to the per-node preview flags.
//! No node is visited twice in one pass.

use std::mem;

use tracing::trace;

use crate::{
    NodeId,
    core::{event::Event, focus::FocusManager, id::HandlerId, tree::Tree},
    error::Result,
    widget::EventOutcome,
};

/// Stage of routing a handler is called in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Offered to the previewing ancestor before anything else.
    Preview,
    /// Climbing from the target to the root.
    Bubble,
}

/// Local event handler closure.
pub type HandlerFn = Box<dyn FnMut(&Event, &mut EventContext<'_>) -> EventOutcome>;

/// What a handler sees while an event is routed.
pub struct EventContext<'a> {
    /// The tree.
    tree: &'a mut Tree,
    /// The node whose handler is running.
    node: NodeId,
    /// Where the event started.
    target: NodeId,
    /// Routing stage.
    phase: Phase,
}

impl EventContext<'_> {
    /// The node whose handler is running.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Where the event started.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Routing stage.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read access to the tree.
    pub fn tree(&self) -> &Tree {
        self.tree
    }

    /// Mutable access to the tree. The running node's widget and handlers
    /// are checked out while they run, so the node appears without them.
    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }
}

/// Route events through the tree.
pub trait EventRouter {
    /// Offer `event` to `start` and its ancestors. Returns the outcome of the
    /// handler that stopped it, or `Ignore` if nothing did.
    fn bubble(&mut self, start: NodeId, event: &Event) -> Result<EventOutcome>;

    /// Bubble from the focused node, or from the root if nothing has focus.
    fn route_to_focused(&mut self, event: &Event) -> Result<EventOutcome>;

    /// Append a handler to `node`'s local chain. Handlers run after the
    /// node's widget, in registration order.
    fn add_handler(
        &mut self,
        node: NodeId,
        handler: impl FnMut(&Event, &mut EventContext<'_>) -> EventOutcome + 'static,
    ) -> Result<HandlerId>;

    /// Remove a handler. Returns false if it is not registered on `node`,
    /// which includes handlers removed while their own chain is running.
    fn remove_handler(&mut self, node: NodeId, id: HandlerId) -> Result<bool>;

    /// Let `node` see events for its descendants before they do.
    fn set_preview(&mut self, node: NodeId, preview: bool) -> Result<()>;
}

/// Offer an event to one node's local chain: widget first, then handlers.
fn deliver(
    tree: &mut Tree,
    node: NodeId,
    target: NodeId,
    phase: Phase,
    event: &Event,
) -> EventOutcome {
    trace!(?node, ?phase, "deliver");
    let Some(mut widget) = tree.nodes.get_mut(node).map(|n| n.widget.take()) else {
        return EventOutcome::Ignore;
    };
    let mut outcome = EventOutcome::Ignore;
    if let Some(w) = widget.as_mut() {
        let mut ctx = EventContext {
            tree: &mut *tree,
            node,
            target,
            phase,
        };
        outcome = w.on_event(event, &mut ctx);
    }
    if let Some(n) = tree.nodes.get_mut(node) {
        n.widget = widget;
    }
    if outcome.is_handled() {
        return outcome;
    }

    let Some(mut handlers) = tree.nodes.get_mut(node).map(|n| mem::take(&mut n.handlers)) else {
        return outcome;
    };
    for (_, h) in handlers.iter_mut() {
        let mut ctx = EventContext {
            tree: &mut *tree,
            node,
            target,
            phase,
        };
        outcome = h(event, &mut ctx);
        if outcome.is_handled() {
            break;
        }
    }
    if let Some(n) = tree.nodes.get_mut(node) {
        let added = mem::replace(&mut n.handlers, handlers);
        n.handlers.extend(added);
    }
    outcome
}

impl EventRouter for Tree {
    fn bubble(&mut self, start: NodeId, event: &Event) -> Result<EventOutcome> {
        self.get(start)?;
        let mut path = vec![start];
        path.extend(self.all_parents(start));

        let previewer = match path.last() {
            Some(top) if self.options.root_preview && *top == self.root() => Some(*top),
            _ => path
                .iter()
                .rev()
                .find(|id| self.node(**id).is_some_and(|n| n.preview))
                .copied(),
        };

        if let Some(p) = previewer {
            let outcome = deliver(self, p, start, Phase::Preview, event);
            if outcome.is_handled() {
                trace!(node = ?p, "stopped in preview");
                return Ok(outcome);
            }
        }
        for id in path {
            if Some(id) == previewer {
                continue;
            }
            let outcome = deliver(self, id, start, Phase::Bubble, event);
            if outcome.is_handled() {
                trace!(node = ?id, "stopped in bubble");
                return Ok(outcome);
            }
        }
        Ok(EventOutcome::Ignore)
    }

    fn route_to_focused(&mut self, event: &Event) -> Result<EventOutcome> {
        let start = self.focused().unwrap_or(self.root);
        self.bubble(start, event)
    }

    fn add_handler(
        &mut self,
        node: NodeId,
        handler: impl FnMut(&Event, &mut EventContext<'_>) -> EventOutcome + 'static,
    ) -> Result<HandlerId> {
        self.get(node)?;
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.get_mut(node)?.handlers.push((id, Box::new(handler)));
        Ok(id)
    }

    fn remove_handler(&mut self, node: NodeId, id: HandlerId) -> Result<bool> {
        let n = self.get_mut(node)?;
        let len = n.handlers.len();
        n.handlers.retain(|(h, _)| *h != id);
        Ok(n.handlers.len() != len)
    }

    fn set_preview(&mut self, node: NodeId, preview: bool) -> Result<()> {
        self.get_mut(node)?.preview = preview;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::core::event::Key;

    #[test]
    fn handler_added_during_dispatch_is_kept() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        tree.add_handler(root, move |_, ctx| {
            *c.borrow_mut() += 1;
            let node = ctx.node();
            let inner = c.clone();
            // A nested registration lands after the running chain.
            ctx.tree_mut()
                .add_handler(node, move |_, _| {
                    *inner.borrow_mut() += 100;
                    EventOutcome::Ignore
                })
                .unwrap();
            EventOutcome::Ignore
        })?;
        tree.bubble(root, &Event::KeyDown(Key::Enter.into()))?;
        assert_eq!(*calls.borrow(), 1);
        tree.bubble(root, &Event::KeyDown(Key::Enter.into()))?;
        assert_eq!(*calls.borrow(), 102);
        Ok(())
    }

    #[test]
    fn context_reports_target_and_phase() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create("a");
        tree.add_child(root, a)?;
        tree.set_preview(root, true)?;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        tree.add_handler(root, move |_, ctx| {
            s.borrow_mut().push((ctx.node(), ctx.target(), ctx.phase()));
            EventOutcome::Ignore
        })?;
        tree.bubble(a, &Event::Custom("x".into()))?;
        assert_eq!(*seen.borrow(), vec![(root, a, Phase::Preview)]);
        Ok(())
    }
}
