use super::{DockOrder, GridSolver, Layout, LayoutStyle, basic, dock, grid, scroll, stack};
use crate::{
    NodeId,
    geom::{Axis, Point, Rect, Size},
};

/// Preferred-size callback: node and available size in, limited preferred size out.
pub(crate) type Measure<'a> = dyn FnMut(NodeId, Size) -> Size + 'a;

/// A computed child position.
pub(crate) type Placement = (NodeId, Rect);

/// A child taking part in a layout pass, with a snapshot of its attributes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Item {
    /// The child node.
    pub id: NodeId,
    /// Its layout attributes.
    pub layout: Layout,
}

/// Strategy inputs that come from the tree rather than the children.
pub(crate) struct Strategy<'a> {
    /// The container's children style.
    pub style: LayoutStyle,
    /// Dock consumption order.
    pub dock_order: DockOrder,
    /// Grid sizing collaborator.
    pub solver: &'a dyn GridSolver,
    /// The container's scroll offset.
    pub offset: Point,
}

impl Strategy<'_> {
    /// Compute child bounds inside `space`. Docked children are placed first and
    /// the remainder goes to the container's style.
    pub(crate) fn arrange(
        &self,
        space: Rect,
        items: &[Item],
        measure: &mut Measure<'_>,
    ) -> Vec<Placement> {
        let docked = dock::arrange(space, items, self.dock_order, measure);
        let mut out = docked.placements;
        let space = docked.remaining;
        let rest = &docked.rest;
        match self.style {
            LayoutStyle::Basic | LayoutStyle::Dock => {
                out.extend(basic::arrange(space, rest, measure));
            }
            LayoutStyle::Vertical => {
                out.extend(stack::arrange(Axis::Vertical, space, rest, measure));
            }
            LayoutStyle::Horizontal => {
                out.extend(stack::arrange(Axis::Horizontal, space, rest, measure));
            }
            LayoutStyle::Grid => out.extend(grid::arrange(space, rest, self.solver, measure)),
            LayoutStyle::Scroll => {
                out.extend(scroll::arrange(space, rest, self.offset, measure));
            }
            LayoutStyle::Manual => {}
        }
        out
    }

    /// Preferred content size of the children, excluding the container's padding.
    /// `bounds` supplies current child bounds for the `Manual` style.
    pub(crate) fn preferred(
        &self,
        items: &[Item],
        available: Size,
        measure: &mut Measure<'_>,
        bounds: &dyn Fn(NodeId) -> Rect,
    ) -> Size {
        let edges = dock::edges(items, self.dock_order, available, measure);
        let (rest, avail) = (&edges.rest, edges.inner_available(available));
        let content = match self.style {
            LayoutStyle::Basic | LayoutStyle::Dock | LayoutStyle::Scroll => {
                basic::preferred(rest, avail, measure)
            }
            LayoutStyle::Vertical => stack::preferred(Axis::Vertical, rest, avail, measure),
            LayoutStyle::Horizontal => stack::preferred(Axis::Horizontal, rest, avail, measure),
            LayoutStyle::Grid => grid::preferred(rest, avail, self.solver, measure),
            LayoutStyle::Manual => rest.iter().fold(Size::ZERO, |acc, item| {
                let b = bounds(item.id);
                acc.max(Size::new(
                    b.right() + item.layout.margin.right,
                    b.bottom() + item.layout.margin.bottom,
                ))
            }),
        };
        edges.wrap(content)
    }
}
