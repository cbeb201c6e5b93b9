//! Synchronous change notifications.
//!
//! Observers receive a [`Change`] after the mutation that caused it has
//! completed. They get no access to the tree, so they cannot mutate it
//! mid-notification.

use crate::{
    core::{
        id::{NodeId, SubscriptionId},
        visual::VisualState,
    },
    geom::Rect,
};

/// A completed mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    /// A node's reported bounds changed.
    BoundsChanged {
        /// The node.
        node: NodeId,
        /// Previous bounds.
        old: Rect,
        /// New bounds.
        new: Rect,
    },
    /// A child was attached.
    ChildInserted {
        /// New parent.
        parent: NodeId,
        /// Attached child.
        child: NodeId,
        /// Position in the parent's children.
        index: usize,
    },
    /// A child was detached.
    ChildRemoved {
        /// Former parent.
        parent: NodeId,
        /// Detached child.
        child: NodeId,
    },
    /// A layout pass over a node's children completed.
    LayoutUpdated {
        /// The container.
        node: NodeId,
    },
    /// A node's resolved visual state changed.
    VisualStateChanged {
        /// The node.
        node: NodeId,
        /// Previous state.
        old: VisualState,
        /// New state.
        new: VisualState,
    },
    /// Focus moved.
    FocusChanged {
        /// Previously focused node.
        old: Option<NodeId>,
        /// Newly focused node.
        new: Option<NodeId>,
    },
    /// The hovered node changed.
    HoveredChanged {
        /// Previously hovered node.
        old: Option<NodeId>,
        /// Newly hovered node.
        new: Option<NodeId>,
    },
}

/// Observer callback.
pub type Observer = Box<dyn FnMut(&Change)>;

/// Registered observers, called in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    /// Next subscription ID.
    next: u64,
    /// Live subscriptions.
    subs: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    /// Register an observer.
    pub(crate) fn subscribe(&mut self, f: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.subs.push((id, f));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.subs.len();
        self.subs.retain(|(s, _)| *s != id);
        self.subs.len() != len
    }

    /// Deliver a change to every observer.
    pub(crate) fn emit(&mut self, change: &Change) {
        for (_, f) in self.subs.iter_mut() {
            f(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use slotmap::SlotMap;

    use super::*;
    use crate::error::Result;

    #[test]
    fn subscribe_and_unsubscribe() -> Result<()> {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        let node = sm.insert(());
        let seen = Rc::new(RefCell::new(0));
        let mut obs = Observers::default();
        let s = seen.clone();
        let id = obs.subscribe(Box::new(move |_| *s.borrow_mut() += 1));
        obs.emit(&Change::LayoutUpdated { node });
        assert!(obs.unsubscribe(id));
        assert!(!obs.unsubscribe(id));
        obs.emit(&Change::LayoutUpdated { node });
        assert_eq!(*seen.borrow(), 1);
        Ok(())
    }
}
