use std::{cell::RefCell, rc::Rc};

use crate::{NodeId, SubscriptionId, Tree, notify::Change};

/// Records every change notification from a tree.
#[derive(Debug, Clone)]
pub struct Recorder {
    /// Captured changes, oldest first.
    changes: Rc<RefCell<Vec<Change>>>,
    /// The subscription feeding this recorder.
    id: SubscriptionId,
}

impl Recorder {
    /// Subscribe a new recorder to `tree`.
    pub fn attach(tree: &mut Tree) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let id = tree.subscribe(move |c| sink.borrow_mut().push(*c));
        Self { changes, id }
    }

    /// Stop recording. Captured changes stay available.
    pub fn detach(&self, tree: &mut Tree) -> bool {
        tree.unsubscribe(self.id)
    }

    /// A copy of everything captured so far.
    pub fn changes(&self) -> Vec<Change> {
        self.changes.borrow().clone()
    }

    /// Number of captured changes matching `f`.
    pub fn count(&self, f: impl Fn(&Change) -> bool) -> usize {
        self.changes.borrow().iter().filter(|c| f(c)).count()
    }

    /// Number of completed layout passes for `node`.
    pub fn layouts(&self, node: NodeId) -> usize {
        self.count(|c| matches!(c, Change::LayoutUpdated { node: n } if *n == node))
    }

    /// Forget captured changes.
    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }
}
