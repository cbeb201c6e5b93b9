use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    core::{
        backend::NativeHandler,
        error::{Error, Result},
        event::InputBinding,
        focus::FocusManager,
        id::{NodeId, SubscriptionId},
        iter::{AllParents, ChildrenRecursive, InputBindingsRecursive},
        node::Node,
        notify::{Change, Observers},
        options::Options,
        suspend::LayoutSuspension,
        visual::track_visual,
    },
    geom::{Point, Rect, Thickness},
    layout::{
        Alignment, AutoGridSolver, Dock, GridCell, GridSolver, Layout, LayoutManager, LayoutStyle,
    },
    widget::Widget,
};

/// The control tree: an arena of nodes under a single root.
///
/// All structural mutation goes through the tree, which keeps the
/// single-parent invariant and fires change notifications once each mutation
/// has completed. Layout, suspension, focus, visual state and event routing are
/// provided by the traits in the crate root, all implemented on `Tree`.
pub struct Tree {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// The implicit root node.
    pub(crate) root: NodeId,
    /// The focused node.
    pub(crate) focus: Option<NodeId>,
    /// Incremented on every focus change.
    pub(crate) focus_gen: u64,
    /// The hovered node.
    pub(crate) hovered: Option<NodeId>,
    /// Platform collaborator.
    pub(crate) backend: Option<Box<dyn NativeHandler>>,
    /// Grid sizing collaborator.
    pub(crate) grid_solver: Box<dyn GridSolver>,
    /// Change observers.
    pub(crate) observers: Observers,
    /// Tree-wide settings.
    pub(crate) options: Options,
    /// Next event handler ID.
    pub(crate) next_handler: u64,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree with default options and an empty root.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// A tree with the given options.
    pub fn with_options(options: Options) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("root", None));
        Self {
            nodes,
            root,
            focus: None,
            focus_gen: 0,
            hovered: None,
            backend: None,
            grid_solver: Box::new(AutoGridSolver),
            observers: Observers::default(),
            options,
            next_handler: 0,
        }
    }

    /// Tree-wide settings.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Install the native handler. Cached scale factors are discarded.
    pub fn set_backend(&mut self, handler: impl NativeHandler + 'static) {
        self.backend = Some(Box::new(handler));
        for (_, n) in self.nodes.iter() {
            n.scale_factor.set(None);
        }
    }

    /// Remove the native handler, returning to computed geometry.
    pub fn clear_backend(&mut self) {
        self.backend = None;
    }

    /// Replace the grid solver used by `Grid` containers.
    pub fn set_grid_solver(&mut self, solver: impl GridSolver + 'static) {
        self.grid_solver = Box::new(solver);
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Does the node exist?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes. The root keeps this false.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node lookup that fails with `NodeNotFound`.
    pub(crate) fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Mutable node lookup that fails with `NodeNotFound`.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Create a detached node without a widget.
    pub fn create(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::new(name, None))
    }

    /// Create a detached node holding `widget`. The node's name is the widget's
    /// name and it is selectable if the widget accepts focus.
    pub fn create_detached<W>(&mut self, widget: W) -> NodeId
    where
        W: Widget + 'static,
    {
        let name = widget.name();
        self.nodes.insert(Node::new(name, Some(Box::new(widget))))
    }

    /// Deliver a change to observers.
    pub(crate) fn emit(&mut self, change: Change) {
        trace!(?change, "change");
        self.observers.emit(&change);
    }

    /// Register a change observer.
    pub fn subscribe(&mut self, f: impl FnMut(&Change) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(f))
    }

    /// Remove a change observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Check that `child` may be placed under `parent`.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if child == self.root {
            return Err(Error::InvalidOperation("the root cannot be reparented".into()));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    /// Unlink `child` from its parent without notifications or layout. Returns
    /// the former parent.
    fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get_mut(child)?.parent.take()?;
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        Some(parent)
    }

    /// Link a detached `child` into `parent` at `index`.
    fn link(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.insert(index, child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Lay out a container after its children changed.
    fn relayout(&mut self, parent: Option<NodeId>) -> Result<()> {
        match parent {
            Some(p) if self.nodes.contains_key(p) => self.perform_layout(p, true),
            _ => Ok(()),
        }
    }

    /// Move `child` under `parent`, or detach it with `None`. The child is
    /// removed from its previous parent before it is added to the new one, and
    /// both parents are laid out afterwards. Reparenting under the current
    /// parent is a no-op.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        let old = self.get(child)?.parent;
        if old == parent {
            return Ok(());
        }
        if let Some(p) = parent {
            self.check_attach(p, child)?;
        }

        let removed = self.unlink(child);
        let inserted = parent.map(|p| {
            let index = self.nodes.get(p).map_or(0, |n| n.children.len());
            self.link(p, index, child);
            (p, index)
        });
        self.debug_assert_tree_invariants();

        if let Some(p) = removed {
            self.emit(Change::ChildRemoved { parent: p, child });
        }
        if let Some((p, index)) = inserted {
            self.emit(Change::ChildInserted {
                parent: p,
                child,
                index,
            });
        }
        self.ensure_invariants();
        self.relayout(removed)?;
        self.relayout(parent)
    }

    /// Insert `child` at `index` in `parent`'s children. A child already under
    /// `parent` is moved to `index`; a child elsewhere is detached first.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        let current = self.get(child)?.parent;
        let len = self.get(parent)?.children.len();
        let limit = if current == Some(parent) { len - 1 } else { len };
        if index > limit {
            return Err(Error::IndexOutOfRange { parent, index, len });
        }
        if current == Some(parent) && self.index_in_parent(child) == Some(index) {
            return Ok(());
        }

        let removed = self.unlink(child);
        self.link(parent, index, child);
        self.debug_assert_tree_invariants();

        if let Some(p) = removed {
            self.emit(Change::ChildRemoved { parent: p, child });
        }
        self.emit(Change::ChildInserted {
            parent,
            child,
            index,
        });
        self.ensure_invariants();
        if removed != Some(parent) {
            self.relayout(removed)?;
        }
        self.relayout(Some(parent))
    }

    /// Append `child` to `parent`. Adding a node to its current parent is a no-op.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.get(child)?.parent != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }
        self.set_parent(child, None)
    }

    /// Replace `parent`'s children with `children`, in order. Former children
    /// not in the list are detached. The container is laid out once.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        self.get(parent)?;
        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !seen.insert(*child) {
                return Err(Error::DuplicateChild {
                    parent,
                    child: *child,
                });
            }
            self.check_attach(parent, *child)?;
        }

        let former = self.get(parent)?.children.clone();
        self.do_inside_layout(parent, |tree| -> Result<()> {
            for old in former.iter().filter(|c| !seen.contains(*c)) {
                tree.set_parent(*old, None)?;
            }
            for (index, child) in children.iter().enumerate() {
                tree.insert_child(parent, index, *child)?;
            }
            Ok(())
        })?
    }

    /// Tear down `node` and its subtree. Descendants are removed children
    /// first, then the node is detached from its parent. Removing the root is
    /// an invalid operation.
    pub fn remove_subtree(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::InvalidOperation("cannot remove root".into()));
        }
        self.get(node)?;

        let mut order = vec![node];
        order.extend(self.children_recursive(node));
        for id in &order {
            if let Some(n) = self.nodes.get_mut(*id) {
                n.disposing = true;
            }
        }
        debug!(?node, count = order.len(), "remove subtree");

        let mut top_parent = None;
        for id in order.iter().rev() {
            let parent = self.unlink(*id);
            if *id == node {
                top_parent = parent;
            }
            self.nodes.remove(*id);
            if let Some(b) = self.backend.as_mut() {
                b.node_removed(*id);
            }
            if let Some(p) = parent {
                self.emit(Change::ChildRemoved {
                    parent: p,
                    child: *id,
                });
            }
        }
        self.debug_assert_tree_invariants();
        self.ensure_invariants();
        self.relayout(top_parent)
    }

    /// Clear focus and hover if they point at nodes that no longer qualify.
    pub(crate) fn ensure_invariants(&mut self) {
        self.ensure_focus_valid();
        if let Some(h) = self.hovered
            && (!self.nodes.contains_key(h) || !self.is_attached_to_root(h))
        {
            track_visual(self, &[h], |t| t.hovered = None);
            self.emit(Change::HoveredChanged {
                old: Some(h),
                new: None,
            });
        }
    }

    /// Position of `node` among its parent's children.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.nodes.get(node)?.parent?;
        self.nodes
            .get(parent)?
            .children
            .iter()
            .position(|c| *c == node)
    }

    /// The parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// The children of `node`, empty if the node does not exist.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map_or(&[], |n| &n.children)
    }

    /// The child at `index`.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// Does `node` have children?
    pub fn has_children(&self, node: NodeId) -> bool {
        !self.children(node).is_empty()
    }

    /// The other children of `node`'s parent, in order.
    pub fn siblings(&self, node: NodeId) -> Vec<NodeId> {
        self.parent(node)
            .map(|p| {
                self.children(p)
                    .iter()
                    .copied()
                    .filter(|c| *c != node)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The sibling after `node`.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let i = self.index_in_parent(node)?;
        self.child_at(self.parent(node)?, i + 1)
    }

    /// The sibling before `node`.
    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let i = self.index_in_parent(node)?;
        self.child_at(self.parent(node)?, i.checked_sub(1)?)
    }

    /// Descendants of `node` in pre-order, excluding `node` itself.
    pub fn children_recursive(&self, node: NodeId) -> ChildrenRecursive<'_> {
        ChildrenRecursive::new(self, node)
    }

    /// Ancestors of `node`, nearest first.
    pub fn all_parents(&self, node: NodeId) -> AllParents<'_> {
        AllParents::new(self, node)
    }

    /// Input bindings of `node` and its descendants, in pre-order, skipping
    /// nodes that are hidden or not effectively enabled.
    pub fn input_bindings_recursive(&self, node: NodeId) -> InputBindingsRecursive<'_> {
        InputBindingsRecursive::new(self, node)
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.all_parents(node).any(|p| p == ancestor)
    }

    /// Is `node` the root or one of its descendants?
    pub fn is_attached_to_root(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node) && (node == self.root || self.is_ancestor(self.root, node))
    }

    /// Own visibility flag.
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.visible)
    }

    /// True if `node` and all its ancestors are visible.
    pub fn is_effectively_visible(&self, node: NodeId) -> bool {
        self.is_visible(node) && self.all_parents(node).all(|p| self.is_visible(p))
    }

    /// Intrinsic enablement flag.
    pub fn is_enabled(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.enabled)
    }

    /// True if `node` and all its ancestors are enabled.
    pub fn is_effectively_enabled(&self, node: NodeId) -> bool {
        self.is_enabled(node) && self.all_parents(node).all(|p| self.is_enabled(p))
    }

    /// Show or hide a node. The parent is laid out again.
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.visible == visible {
            return Ok(());
        }
        n.visible = visible;
        let parent = n.parent;
        self.ensure_invariants();
        self.relayout(parent)
    }

    /// Enable or disable a node. Descendants' intrinsic flags are untouched,
    /// but their effective enablement and visual state follow.
    pub fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<()> {
        if self.get(node)?.enabled == enabled {
            return Ok(());
        }
        let mut affected = vec![node];
        affected.extend(self.children_recursive(node));
        track_visual(self, &affected, |t| {
            if let Some(n) = t.nodes.get_mut(node) {
                n.enabled = enabled;
            }
        });
        self.ensure_invariants();
        Ok(())
    }

    /// Exclude a node from its parent's layout pass, or include it again.
    pub fn set_ignore_layout(&mut self, node: NodeId, ignore: bool) -> Result<()> {
        let n = self.get_mut(node)?;
        if n.ignore_layout == ignore {
            return Ok(());
        }
        n.ignore_layout = ignore;
        let parent = n.parent;
        self.relayout(parent)
    }

    /// Allow or forbid focus. Read on demand; nothing is recomputed.
    pub fn set_can_select(&mut self, node: NodeId, can_select: bool) -> Result<()> {
        self.get_mut(node)?.can_select = can_select;
        Ok(())
    }

    /// Include or exclude a node from tab traversal.
    pub fn set_tab_stop(&mut self, node: NodeId, tab_stop: bool) -> Result<()> {
        self.get_mut(node)?.tab_stop = tab_stop;
        Ok(())
    }

    /// Set the tab order among siblings. Equal indices keep child order.
    pub fn set_tab_index(&mut self, node: NodeId, tab_index: i32) -> Result<()> {
        self.get_mut(node)?.tab_index = tab_index;
        Ok(())
    }

    /// Layout attributes of `node`.
    pub fn layout(&self, node: NodeId) -> Result<Layout> {
        Ok(self.get(node)?.layout)
    }

    /// Modify the layout attributes of `node`. If anything changed, the node
    /// is laid out (when it has children) along with its ancestors, otherwise
    /// its parent is.
    pub fn update_layout(&mut self, node: NodeId, f: impl FnOnce(&mut Layout)) -> Result<()> {
        let n = self.get_mut(node)?;
        let before = n.layout;
        f(&mut n.layout);
        if n.layout == before {
            return Ok(());
        }
        let parent = n.parent;
        if n.children.is_empty() {
            self.relayout(parent)
        } else {
            self.perform_layout(node, true)
        }
    }

    /// Set the margin.
    pub fn set_margin(&mut self, node: NodeId, margin: Thickness) -> Result<()> {
        self.update_layout(node, |l| l.margin = margin)
    }

    /// Set the padding.
    pub fn set_padding(&mut self, node: NodeId, padding: Thickness) -> Result<()> {
        self.update_layout(node, |l| l.padding = padding)
    }

    /// Set horizontal and vertical alignment.
    pub fn set_alignment(
        &mut self,
        node: NodeId,
        horizontal: Alignment,
        vertical: Alignment,
    ) -> Result<()> {
        self.update_layout(node, |l| {
            l.horizontal = horizontal;
            l.vertical = vertical;
        })
    }

    /// Set the dock edge.
    pub fn set_dock(&mut self, node: NodeId, dock: Dock) -> Result<()> {
        self.update_layout(node, |l| l.dock = dock)
    }

    /// Set how `node` arranges its children.
    pub fn set_layout_style(&mut self, node: NodeId, style: LayoutStyle) -> Result<()> {
        self.update_layout(node, |l| l.style = style)
    }

    /// Set the suggested size. NaN leaves an axis to the engine.
    pub fn set_suggested_size(&mut self, node: NodeId, width: f64, height: f64) -> Result<()> {
        self.update_layout(node, |l| *l = l.size(width, height))
    }

    /// Set the minimum size. NaN leaves an axis unbounded.
    pub fn set_min_size(&mut self, node: NodeId, width: f64, height: f64) -> Result<()> {
        self.update_layout(node, |l| *l = l.min_size(width, height))
    }

    /// Set the maximum size. NaN leaves an axis unbounded.
    pub fn set_max_size(&mut self, node: NodeId, width: f64, height: f64) -> Result<()> {
        self.update_layout(node, |l| *l = l.max_size(width, height))
    }

    /// Set the offset applied to children of a `Scroll` container.
    pub fn set_scroll_offset(&mut self, node: NodeId, offset: Point) -> Result<()> {
        self.update_layout(node, |l| l.scroll_offset = offset)
    }

    /// Set the grid cell. Indices are clamped to zero and spans to one.
    pub fn set_grid_cell(
        &mut self,
        node: NodeId,
        row: i32,
        column: i32,
        row_span: i32,
        column_span: i32,
    ) -> Result<()> {
        let cell = GridCell::new(row, column, row_span, column_span);
        self.update_layout(node, |l| l.grid = cell)
    }

    /// Bounds of `node` in its parent's client coordinates. Missing and
    /// disposing nodes report an empty rectangle.
    pub fn bounds(&self, node: NodeId) -> Rect {
        match self.nodes.get(node) {
            Some(n) if !n.disposing => n.bounds,
            _ => Rect::default(),
        }
    }

    /// Last bounds reported by the native handler.
    pub fn reported_bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node).and_then(|n| n.reported_bounds)
    }

    /// The node's own coordinate space: its size at the origin.
    pub fn client_rect(&self, node: NodeId) -> Rect {
        self.bounds(node).size().rect()
    }

    /// Device pixels per unit. Cached per node; falls back to the native
    /// handler and then to the configured default.
    pub fn scale_factor(&self, node: NodeId) -> f64 {
        let Some(n) = self.nodes.get(node) else {
            return self.options.default_scale_factor;
        };
        if let Some(s) = n.scale_factor.get() {
            return s;
        }
        match self.backend.as_ref().and_then(|b| b.scale_factor(node)) {
            Some(s) => {
                n.scale_factor.set(Some(s));
                s
            }
            None => self.options.default_scale_factor,
        }
    }

    /// Drop the cached scale factor of `node` and its descendants.
    pub fn reset_scale_factor(&mut self, node: NodeId) -> Result<()> {
        self.get(node)?.scale_factor.set(None);
        for id in self.children_recursive(node) {
            if let Some(n) = self.nodes.get(id) {
                n.scale_factor.set(None);
            }
        }
        Ok(())
    }

    /// Attach an input binding to `node`.
    pub fn add_input_binding(&mut self, node: NodeId, binding: InputBinding) -> Result<()> {
        self.get_mut(node)?.input_bindings.push(binding);
        Ok(())
    }

    /// Assert structural invariants in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) fn debug_assert_tree_invariants(&self) {
        if let Some(root) = self.nodes.get(self.root) {
            debug_assert!(root.parent.is_none(), "root has parent");
        } else {
            debug_assert!(false, "root node missing");
        }
        for (id, node) in self.nodes.iter() {
            let mut seen = HashSet::with_capacity(node.children.len());
            for child in &node.children {
                debug_assert!(seen.insert(*child), "duplicate child {child:?} under {id:?}");
                debug_assert!(
                    self.nodes.get(*child).is_some_and(|c| c.parent == Some(id)),
                    "child {child:?} parent mismatch under {id:?}"
                );
            }
            if let Some(parent) = node.parent {
                debug_assert!(
                    self.nodes
                        .get(parent)
                        .is_some_and(|p| p.children.contains(&id)),
                    "parent {parent:?} missing child {id:?}"
                );
            }
            let mut chain = HashSet::new();
            let mut current = Some(id);
            while let Some(c) = current {
                if !chain.insert(c) {
                    debug_assert!(false, "cycle detected from {id:?}");
                    break;
                }
                current = self.nodes.get(c).and_then(|n| n.parent);
            }
        }
    }

    /// Assert structural invariants in debug builds.
    #[cfg(not(debug_assertions))]
    pub(crate) fn debug_assert_tree_invariants(&self) {}
}
