use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::arrange::{Item, Placement, Strategy};
use crate::{
    NodeId,
    core::{Tree, notify::Change},
    error::Result,
    geom::{Rect, Size},
};

/// Layout passes over the tree.
pub trait LayoutManager {
    /// Recompute the bounds of `node`'s children.
    ///
    /// With `layout_parent`, the ancestor chain is laid out first, which lets
    /// a changed subtree ripple its new preferred size upwards. Suspended
    /// nodes and nodes already mid-layout are skipped. Hidden and ignored
    /// nodes never lay out their parent.
    fn perform_layout(&mut self, node: NodeId, layout_parent: bool) -> Result<()>;

    /// Preferred size of `node` given `available` space, before min/max limits.
    /// Missing nodes measure as zero.
    fn preferred_size(&self, node: NodeId, available: Size) -> Size;

    /// Preferred size with the node's min/max limits applied.
    fn preferred_size_limited(&self, node: NodeId, available: Size) -> Size;

    /// The rectangle children are arranged in: the client rectangle deflated
    /// by padding, empty if nothing is left.
    fn children_layout_bounds(&self, node: NodeId) -> Rect;

    /// Children that take part in layout: visible and not ignoring layout.
    fn children_in_layout(&self, node: NodeId) -> Vec<NodeId>;

    /// Assign bounds to `node` through the native handler. The handler's
    /// reported bounds win if it has any. Observers hear about it only when
    /// the reported snapshot changes, and a node whose size changed lays out
    /// its own children.
    fn set_bounds(&mut self, node: NodeId, bounds: Rect) -> Result<()>;
}

/// Cache key for a measurement: node and the bit patterns of the available size.
type MeasureKey = (NodeId, u64, u64);

/// Snapshot the children that take part in layout.
fn items(tree: &Tree, node: NodeId) -> Vec<Item> {
    tree.children_in_layout(node)
        .into_iter()
        .filter_map(|id| {
            tree.node(id).map(|n| Item {
                id,
                layout: n.layout,
            })
        })
        .collect()
}

/// Compute child placements for `node` without touching the tree.
fn placements(tree: &Tree, node: NodeId) -> Result<Vec<Placement>> {
    let layout = tree.get(node)?.layout;
    let items = items(tree, node);
    let space = tree.children_layout_bounds(node);
    let strategy = Strategy {
        style: layout.style,
        dock_order: tree.options.dock_order,
        solver: tree.grid_solver.as_ref(),
        offset: layout.scroll_offset,
    };
    let mut cache: HashMap<MeasureKey, Size> = HashMap::new();
    let mut measure = |id: NodeId, avail: Size| {
        *cache
            .entry((id, avail.width.to_bits(), avail.height.to_bits()))
            .or_insert_with(|| tree.preferred_size_limited(id, avail))
    };
    Ok(strategy.arrange(space, &items, &mut measure))
}

/// The body of a layout pass: ancestors first if requested, then children.
fn layout_pass(tree: &mut Tree, node: NodeId, parent: Option<NodeId>) -> Result<()> {
    if let Some(p) = parent {
        tree.perform_layout(p, true)?;
    }
    for (child, bounds) in placements(tree, node)? {
        tree.set_bounds(child, bounds)?;
    }
    Ok(())
}

impl LayoutManager for Tree {
    fn perform_layout(&mut self, node: NodeId, layout_parent: bool) -> Result<()> {
        let n = self.get(node)?;
        if n.suspend_count > 0 {
            debug!(?node, depth = n.suspend_count, "layout suspended");
            return Ok(());
        }
        if n.in_layout {
            debug!(?node, "re-entrant layout suppressed");
            return Ok(());
        }
        let parent = if layout_parent && n.visible && !n.ignore_layout {
            n.parent
        } else {
            None
        };
        trace!(?node, layout_parent, "layout pass");

        self.get_mut(node)?.in_layout = true;
        let res = layout_pass(self, node, parent);
        if let Some(n) = self.nodes.get_mut(node) {
            n.in_layout = false;
        }
        res?;
        if self.contains(node) {
            self.emit(Change::LayoutUpdated { node });
        }
        Ok(())
    }

    fn preferred_size(&self, node: NodeId, available: Size) -> Size {
        let Some(n) = self.node(node) else {
            return Size::ZERO;
        };
        if n.disposing {
            return Size::ZERO;
        }
        let layout = n.layout;
        if layout.is_fully_specified() {
            return layout.apply_suggested(Size::ZERO);
        }

        let pad = layout.padding;
        let inner = available.shrink(pad.horizontal(), pad.vertical());
        let items = items(self, node);
        let content = if items.is_empty() {
            n.widget
                .as_ref()
                .and_then(|w| w.measure(inner))
                .or_else(|| match self.backend.as_ref() {
                    Some(b) => b.measure(node, inner),
                    None => {
                        if n.widget.is_some() {
                            warn!(?node, "no native handler to measure leaf");
                        }
                        None
                    }
                })
                .unwrap_or(Size::ZERO)
        } else {
            let strategy = Strategy {
                style: layout.style,
                dock_order: self.options.dock_order,
                solver: self.grid_solver.as_ref(),
                offset: layout.scroll_offset,
            };
            let mut measure = |id: NodeId, avail: Size| self.preferred_size_limited(id, avail);
            strategy.preferred(&items, inner, &mut measure, &|id: NodeId| self.bounds(id))
        };
        layout.apply_suggested(content.grow(pad.horizontal(), pad.vertical()))
    }

    fn preferred_size_limited(&self, node: NodeId, available: Size) -> Size {
        match self.node(node) {
            Some(n) => n.layout.limit(self.preferred_size(node, available)),
            None => Size::ZERO,
        }
    }

    fn children_layout_bounds(&self, node: NodeId) -> Rect {
        let Some(n) = self.node(node) else {
            return Rect::default();
        };
        let r = self.client_rect(node).deflate(n.layout.padding);
        if r.width <= 0.0 || r.height <= 0.0 {
            Rect::new(r.x, r.y, 0.0, 0.0)
        } else {
            r
        }
    }

    fn children_in_layout(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|c| {
                self.node(*c)
                    .is_some_and(|n| n.visible && !n.ignore_layout)
            })
            .collect()
    }

    fn set_bounds(&mut self, node: NodeId, bounds: Rect) -> Result<()> {
        let n = self.get(node)?;
        if n.disposing {
            return Ok(());
        }
        let old = n.bounds;
        let has_children = !n.children.is_empty();

        if let Some(b) = self.backend.as_mut() {
            b.apply_bounds(node, bounds);
        }
        let actual = self
            .backend
            .as_ref()
            .and_then(|b| b.report_bounds(node))
            .unwrap_or(bounds);

        let n = self.get_mut(node)?;
        n.bounds = actual;
        let changed = n.reported_bounds != Some(actual);
        n.reported_bounds = Some(actual);
        if changed {
            self.emit(Change::BoundsChanged {
                node,
                old,
                new: actual,
            });
        }
        if has_children && old.size() != actual.size() {
            self.perform_layout(node, false)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        LayoutSuspension,
        geom::Thickness,
        layout::{Alignment, Dock, LayoutStyle},
        testing::{FixedHandler, Recorder},
    };

    fn sized(tree: &mut Tree, handler: &mut FixedHandler, w: f64, h: f64) -> NodeId {
        let id = tree.create("leaf");
        handler.set_size(id, Size::new(w, h));
        id
    }

    #[test]
    fn padding_shrinks_child_space() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let mut handler = FixedHandler::new();
        let a = sized(&mut tree, &mut handler, 10.0, 10.0);
        tree.set_backend(handler);
        tree.add_child(root, a)?;
        tree.set_padding(root, Thickness::uniform(5.0))?;
        tree.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 50.0))?;
        assert_eq!(tree.children_layout_bounds(root), Rect::new(5.0, 5.0, 90.0, 40.0));
        assert_eq!(tree.bounds(a), Rect::new(5.0, 5.0, 90.0, 40.0));
        Ok(())
    }

    #[test]
    fn children_layout_bounds_empty_when_padding_exceeds() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.set_padding(root, Thickness::uniform(30.0))?;
        tree.set_bounds(root, Rect::new(0.0, 0.0, 50.0, 50.0))?;
        assert!(tree.children_layout_bounds(root).is_empty());
        Ok(())
    }

    #[test]
    fn preferred_size_of_container() -> Result<()> {
        let mut tree = Tree::new();
        let mut handler = FixedHandler::new();
        let panel = tree.create("panel");
        let a = sized(&mut tree, &mut handler, 10.0, 20.0);
        let b = sized(&mut tree, &mut handler, 30.0, 5.0);
        tree.set_backend(handler);
        tree.add_child(panel, a)?;
        tree.add_child(panel, b)?;
        tree.set_padding(panel, Thickness::uniform(1.0))?;
        assert_eq!(tree.preferred_size(panel, Size::INFINITE), Size::new(32.0, 22.0));
        tree.set_layout_style(panel, LayoutStyle::Vertical)?;
        assert_eq!(tree.preferred_size(panel, Size::INFINITE), Size::new(32.0, 27.0));
        tree.set_suggested_size(panel, f64::NAN, 100.0)?;
        assert_eq!(tree.preferred_size(panel, Size::INFINITE), Size::new(32.0, 100.0));
        tree.set_suggested_size(panel, 7.0, 8.0)?;
        assert_eq!(tree.preferred_size(panel, Size::INFINITE), Size::new(7.0, 8.0));
        Ok(())
    }

    #[test]
    fn limited_preferred_size() -> Result<()> {
        let mut tree = Tree::new();
        let mut handler = FixedHandler::new();
        let a = sized(&mut tree, &mut handler, 10.0, 20.0);
        tree.set_backend(handler);
        tree.set_min_size(a, 15.0, f64::NAN)?;
        tree.set_max_size(a, f64::NAN, 12.0)?;
        assert_eq!(tree.preferred_size_limited(a, Size::INFINITE), Size::new(15.0, 12.0));
        tree.set_min_size(a, 40.0, f64::NAN)?;
        tree.set_max_size(a, 30.0, f64::NAN)?;
        assert_eq!(tree.preferred_size_limited(a, Size::INFINITE).width, 30.0);
        Ok(())
    }

    #[test]
    fn missing_node_is_neutral() -> Result<()> {
        let mut tree = Tree::new();
        let a = tree.create("a");
        tree.remove_subtree(a)?;
        assert_eq!(tree.preferred_size(a, Size::INFINITE), Size::ZERO);
        assert_eq!(tree.bounds(a), Rect::default());
        assert!(tree.perform_layout(a, false).is_err());
        Ok(())
    }

    #[test]
    fn rounding_handler_reports_bounds() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let mut handler = FixedHandler::new().with_rounding(1.0);
        let a = sized(&mut tree, &mut handler, 10.0, 10.0);
        tree.set_backend(handler);
        tree.add_child(root, a)?;
        tree.set_alignment(a, Alignment::Center, Alignment::Center)?;
        tree.set_bounds(root, Rect::new(0.0, 0.0, 25.0, 25.0))?;
        assert_eq!(tree.bounds(a), Rect::new(8.0, 8.0, 10.0, 10.0));
        assert_eq!(tree.reported_bounds(a), Some(Rect::new(8.0, 8.0, 10.0, 10.0)));
        Ok(())
    }

    #[test]
    fn bounds_changed_only_on_change() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let mut handler = FixedHandler::new();
        let a = sized(&mut tree, &mut handler, 10.0, 10.0);
        tree.set_backend(handler);
        tree.add_child(root, a)?;
        tree.set_dock(a, Dock::Top)?;
        tree.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 100.0))?;
        let rec = Recorder::attach(&mut tree);
        tree.perform_layout(root, false)?;
        assert_eq!(rec.count(|c| matches!(c, Change::BoundsChanged { .. })), 0);
        tree.set_margin(a, Thickness::uniform(1.0))?;
        assert_eq!(
            rec.count(|c| matches!(c, Change::BoundsChanged { node, .. } if *node == a)),
            1
        );
        Ok(())
    }

    #[test]
    fn resize_cascades_to_grandchildren() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let panel = tree.create("panel");
        let leaf = tree.create("leaf");
        tree.suspend_layout(root)?;
        tree.add_child(root, panel)?;
        tree.add_child(panel, leaf)?;
        tree.resume_layout(root, false)?;
        tree.set_bounds(root, Rect::new(0.0, 0.0, 40.0, 30.0))?;
        assert_eq!(tree.bounds(panel), Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(tree.bounds(leaf), Rect::new(0.0, 0.0, 40.0, 30.0));
        tree.set_bounds(root, Rect::new(0.0, 0.0, 10.0, 10.0))?;
        assert_eq!(tree.bounds(leaf), Rect::new(0.0, 0.0, 10.0, 10.0));
        Ok(())
    }
}
