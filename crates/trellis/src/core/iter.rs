//! Lazy traversals over the tree.
//!
//! Each iterator borrows the tree, so the tree cannot be mutated while one is
//! alive. Callers that need to mutate during traversal collect first. All of
//! them are `Clone`; cloning before consuming gives a restartable sequence.

use std::{
    iter::{Chain, Once, once},
    slice,
};

use crate::core::{event::InputBinding, id::NodeId, tree::Tree};

/// Descendants in pre-order, parents before children, excluding the start node.
#[derive(Clone)]
pub struct ChildrenRecursive<'a> {
    /// The tree being walked.
    tree: &'a Tree,
    /// Nodes still to visit, next on top.
    stack: Vec<NodeId>,
}

impl<'a> ChildrenRecursive<'a> {
    /// Walk the descendants of `start`.
    pub(crate) fn new(tree: &'a Tree, start: NodeId) -> Self {
        let stack = tree.children(start).iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl Iterator for ChildrenRecursive<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Ancestors, nearest first.
#[derive(Clone)]
pub struct AllParents<'a> {
    /// The tree being walked.
    tree: &'a Tree,
    /// Node whose parent is yielded next.
    current: Option<NodeId>,
}

impl<'a> AllParents<'a> {
    /// Walk the ancestors of `start`.
    pub(crate) fn new(tree: &'a Tree, start: NodeId) -> Self {
        Self {
            tree,
            current: Some(start),
        }
    }
}

impl Iterator for AllParents<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let parent = self.tree.parent(self.current?);
        self.current = parent;
        parent
    }
}

/// Input bindings from a node and its descendants, in pre-order.
///
/// Nodes whose own visibility flag is off, or that are not effectively
/// enabled, contribute nothing. Their descendants are still visited, unless
/// the node is the start node, in which case the walk yields nothing.
#[derive(Clone)]
pub struct InputBindingsRecursive<'a> {
    /// The tree being walked.
    tree: &'a Tree,
    /// Remaining nodes, `None` when the start node does not contribute.
    nodes: Option<Chain<Once<NodeId>, ChildrenRecursive<'a>>>,
    /// Bindings of the current node.
    current: slice::Iter<'a, InputBinding>,
}

impl<'a> InputBindingsRecursive<'a> {
    /// Walk the bindings of `start` and its descendants.
    pub(crate) fn new(tree: &'a Tree, start: NodeId) -> Self {
        let nodes = contributes(tree, start)
            .then(|| once(start).chain(ChildrenRecursive::new(tree, start)));
        Self {
            tree,
            nodes,
            current: slice::Iter::default(),
        }
    }
}

/// Can the bindings of `node` fire?
fn contributes(tree: &Tree, node: NodeId) -> bool {
    tree.node(node)
        .is_some_and(|n| n.is_visible() && tree.is_effectively_enabled(node))
}

impl<'a> Iterator for InputBindingsRecursive<'a> {
    type Item = &'a InputBinding;

    fn next(&mut self) -> Option<&'a InputBinding> {
        loop {
            if let Some(b) = self.current.next() {
                return Some(b);
            }
            let id = self.nodes.as_mut()?.next()?;
            let tree = self.tree;
            if contributes(tree, id)
                && let Some(n) = tree.node(id)
            {
                self.current = n.input_bindings().iter();
            }
        }
    }
}
