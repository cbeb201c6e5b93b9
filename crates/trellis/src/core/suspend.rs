//! Layout suspension.
//!
//! Each node carries a suspension counter. While it is above zero, layout
//! passes for the node are skipped; the matching outermost resume can run one
//! consolidated pass. [`LayoutSuspendGuard`] and
//! [`LayoutSuspension::do_inside_layout`] tie the resume to scope exit.

use std::ops::{Deref, DerefMut};

use scopeguard::ScopeGuard;
use tracing::{error, trace, warn};

use crate::{
    NodeId,
    core::tree::Tree,
    error::{Error, Result},
    layout::LayoutManager,
};

/// Suspend and resume layout passes.
pub trait LayoutSuspension {
    /// Increment the suspension counter of `node`.
    fn suspend_layout(&mut self, node: NodeId) -> Result<()>;

    /// Decrement the counter. When it reaches zero and `perform` is set, lay
    /// out the node and its ancestors.
    fn resume_layout(&mut self, node: NodeId, perform: bool) -> Result<()>;

    /// Decrement the counter, choosing whether the final pass also lays out
    /// ancestors. Resuming an unsuspended node is an error and leaves the
    /// counter at zero.
    fn resume_layout_with(&mut self, node: NodeId, perform: bool, layout_parent: bool)
    -> Result<()>;

    /// Is the node's counter above zero?
    fn is_layout_suspended(&self, node: NodeId) -> bool;

    /// Current suspension depth.
    fn layout_suspend_count(&self, node: NodeId) -> u32;

    /// Alias for `suspend_layout`, used around initialisation.
    fn begin_init(&mut self, node: NodeId) -> Result<()> {
        self.suspend_layout(node)
    }

    /// Alias for `resume_layout(node, true)`.
    fn end_init(&mut self, node: NodeId) -> Result<()> {
        self.resume_layout(node, true)
    }

    /// Suspend `node` and return a guard that resumes it when dropped.
    fn suspend_guard(&mut self, node: NodeId, perform: bool) -> Result<LayoutSuspendGuard<'_>>;

    /// Run `action` with `node` suspended. The node is resumed with a layout
    /// pass on every exit path; a panic in `action` still resumes the node.
    fn do_inside_layout<R>(&mut self, node: NodeId, action: impl FnOnce(&mut Tree) -> R)
    -> Result<R>;
}

/// Resumes layout on a node when dropped.
///
/// The guard dereferences to the tree, so mutations can be made through it
/// while the node is suspended.
pub struct LayoutSuspendGuard<'a> {
    /// The suspended tree.
    tree: &'a mut Tree,
    /// The suspended node.
    node: NodeId,
    /// Lay out on resume.
    perform: bool,
    /// Lay out ancestors on resume.
    layout_parent: bool,
}

impl LayoutSuspendGuard<'_> {
    /// Also lay out ancestors when the guard drops.
    pub fn layout_parent(mut self, layout_parent: bool) -> Self {
        self.layout_parent = layout_parent;
        self
    }

    /// The suspended node.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Deref for LayoutSuspendGuard<'_> {
    type Target = Tree;

    fn deref(&self) -> &Tree {
        self.tree
    }
}

impl DerefMut for LayoutSuspendGuard<'_> {
    fn deref_mut(&mut self) -> &mut Tree {
        self.tree
    }
}

impl Drop for LayoutSuspendGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self
            .tree
            .resume_layout_with(self.node, self.perform, self.layout_parent)
        {
            error!(node = ?self.node, error = %e, "resume on guard drop failed");
        }
    }
}

impl LayoutSuspension for Tree {
    fn suspend_layout(&mut self, node: NodeId) -> Result<()> {
        let n = self.get_mut(node)?;
        n.suspend_count += 1;
        trace!(?node, depth = n.suspend_count, "suspend layout");
        Ok(())
    }

    fn resume_layout(&mut self, node: NodeId, perform: bool) -> Result<()> {
        self.resume_layout_with(node, perform, true)
    }

    fn resume_layout_with(
        &mut self,
        node: NodeId,
        perform: bool,
        layout_parent: bool,
    ) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.suspend_count == 0 {
            warn!(?node, "resume_layout without matching suspend_layout");
            return Err(Error::UnbalancedResume(node));
        }
        n.suspend_count -= 1;
        trace!(?node, depth = n.suspend_count, "resume layout");
        if n.suspend_count == 0 && perform {
            self.perform_layout(node, layout_parent)?;
        }
        Ok(())
    }

    fn is_layout_suspended(&self, node: NodeId) -> bool {
        self.layout_suspend_count(node) > 0
    }

    fn layout_suspend_count(&self, node: NodeId) -> u32 {
        self.node(node).map_or(0, |n| n.suspend_count)
    }

    fn suspend_guard(&mut self, node: NodeId, perform: bool) -> Result<LayoutSuspendGuard<'_>> {
        self.suspend_layout(node)?;
        Ok(LayoutSuspendGuard {
            tree: self,
            node,
            perform,
            layout_parent: true,
        })
    }

    fn do_inside_layout<R>(
        &mut self,
        node: NodeId,
        action: impl FnOnce(&mut Tree) -> R,
    ) -> Result<R> {
        self.suspend_layout(node)?;
        let mut tree = scopeguard::guard(self, move |t| {
            if let Err(e) = t.resume_layout(node, true) {
                error!(?node, error = %e, "resume after unwinding failed");
            }
        });
        let out = action(&mut tree);
        let tree = ScopeGuard::into_inner(tree);
        tree.resume_layout(node, true)?;
        Ok(out)
    }
}
