use super::{
    Dock, DockOrder, align_span,
    arrange::{Item, Measure, Placement},
    basic,
};
use crate::geom::{Axis, Rect, Size};

/// Result of the docking pre-pass.
pub(crate) struct Docked {
    /// Bounds of the docked children.
    pub placements: Vec<Placement>,
    /// Space left for the non-docked children.
    pub remaining: Rect,
    /// Non-docked children, in declaration order.
    pub rest: Vec<Item>,
}

/// Docked children in consumption order.
fn docked(items: &[Item], order: DockOrder) -> Vec<&Item> {
    let mut v: Vec<&Item> = items.iter().filter(|i| i.layout.dock != Dock::None).collect();
    if order == DockOrder::Reverse {
        v.reverse();
    }
    v
}

/// Axis consumed by a dock edge, and whether it is taken from the trailing side.
fn edge(dock: Dock) -> Option<(Axis, bool)> {
    match dock {
        Dock::Top => Some((Axis::Vertical, false)),
        Dock::Bottom => Some((Axis::Vertical, true)),
        Dock::Left => Some((Axis::Horizontal, false)),
        Dock::Right => Some((Axis::Horizontal, true)),
        Dock::None | Dock::Fill => None,
    }
}

/// Peel docked children off the edges of `space`.
///
/// Each edge child takes its preferred extent plus margins, clamped to what is
/// left, and spans the full remaining rectangle across the edge. `Fill`
/// children are placed after every edge child, each in the final remainder,
/// which is then empty for the non-docked children.
pub(crate) fn arrange(
    space: Rect,
    items: &[Item],
    order: DockOrder,
    measure: &mut Measure<'_>,
) -> Docked {
    let mut remaining = space;
    let mut placements = Vec::new();
    let mut fills = Vec::new();
    for item in docked(items, order) {
        let Some((axis, trailing)) = edge(item.layout.dock) else {
            fills.push(item);
            continue;
        };
        let pref = measure(item.id, remaining.size());
        let cross = axis.cross();
        let (r_origin, r_len) = axis.span(remaining);
        let (lead, trail) = item.layout.margins(axis);
        let taken = (axis.extent(pref) + lead + trail).min(r_len);
        let slot_origin = if trailing {
            r_origin + r_len - taken
        } else {
            r_origin
        };
        let main = (slot_origin + lead, (taken - lead - trail).max(0.0));
        let c = align_span(
            cross.span(remaining).0,
            cross.span(remaining).1,
            cross.extent(pref),
            item.layout.margins(cross),
            item.layout.alignment(cross),
            item.layout.limits(cross),
        );
        placements.push((item.id, axis.rect(main, c)));
        let rest_origin = if trailing { r_origin } else { r_origin + taken };
        remaining = axis.rect((rest_origin, r_len - taken), cross.span(remaining));
    }
    for item in &fills {
        let pref = measure(item.id, remaining.size());
        let (x, w) = basic::place(item, remaining, pref, Axis::Horizontal);
        let (y, h) = basic::place(item, remaining, pref, Axis::Vertical);
        placements.push((item.id, Rect::new(x, y, w, h)));
    }
    if !fills.is_empty() {
        remaining = Rect::new(remaining.x, remaining.y, 0.0, 0.0);
    }
    Docked {
        placements,
        remaining,
        rest: items
            .iter()
            .filter(|i| i.layout.dock == Dock::None)
            .copied()
            .collect(),
    }
}

/// Space consumed by docked children while measuring.
pub(crate) struct Edges {
    /// Width and height taken by edge children so far.
    used: Size,
    /// Running bound imposed by the edge children themselves.
    bound: Size,
    /// Largest `Fill` child, margins included.
    fill: Size,
    /// Non-docked children, in declaration order.
    pub rest: Vec<Item>,
}

impl Edges {
    /// Space left for the non-docked children.
    pub(crate) fn inner_available(&self, available: Size) -> Size {
        available.shrink(self.used.width, self.used.height)
    }

    /// Combine the edges with the preferred size of the non-docked content.
    pub(crate) fn wrap(&self, content: Size) -> Size {
        let content = content.max(self.fill);
        Size::new(
            self.bound.width.max(self.used.width + content.width),
            self.bound.height.max(self.used.height + content.height),
        )
    }
}

/// Accumulate docked children edge by edge for a preferred-size query.
pub(crate) fn edges(
    items: &[Item],
    order: DockOrder,
    available: Size,
    measure: &mut Measure<'_>,
) -> Edges {
    let (mut used_w, mut used_h) = (0.0_f64, 0.0_f64);
    let (mut max_w, mut max_h) = (0.0_f64, 0.0_f64);
    let mut fill = Size::ZERO;
    for item in docked(items, order) {
        let avail = available.shrink(used_w, used_h);
        let m = item.layout.margin;
        let pref = measure(item.id, avail).grow(m.horizontal(), m.vertical());
        match edge(item.layout.dock) {
            Some((Axis::Vertical, _)) => {
                max_w = max_w.max(used_w + pref.width);
                used_h += pref.height;
            }
            Some((Axis::Horizontal, _)) => {
                max_h = max_h.max(used_h + pref.height);
                used_w += pref.width;
            }
            None => fill = fill.max(pref),
        }
    }
    Edges {
        used: Size::new(used_w, used_h),
        bound: Size::new(max_w, max_h),
        fill,
        rest: items
            .iter()
            .filter(|i| i.layout.dock == Dock::None)
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        NodeId,
        error::Result,
        geom::Thickness,
        layout::{Layout, arrange::tests::ids},
    };

    fn item(id: NodeId, dock: Dock) -> Item {
        Item {
            id,
            layout: Layout::basic().dock(dock),
        }
    }

    #[test]
    fn top_consumes_edge() -> Result<()> {
        let id = ids(2);
        let its = vec![item(id[0], Dock::Top), item(id[1], Dock::None)];
        let mut measure = |_: NodeId, _: Size| Size::new(30.0, 10.0);
        let out = arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &its,
            DockOrder::Declaration,
            &mut measure,
        );
        assert_eq!(out.placements, vec![(id[0], Rect::new(0.0, 0.0, 100.0, 10.0))]);
        assert_eq!(out.remaining, Rect::new(0.0, 10.0, 100.0, 90.0));
        assert_eq!(out.rest.len(), 1);
        assert_eq!(out.rest[0].id, id[1]);
        Ok(())
    }

    #[test]
    fn all_edges_then_fill() -> Result<()> {
        let id = ids(5);
        let its = vec![
            item(id[0], Dock::Left),
            item(id[1], Dock::Top),
            item(id[2], Dock::Right),
            item(id[3], Dock::Bottom),
            item(id[4], Dock::Fill),
        ];
        let mut measure = |_: NodeId, _: Size| Size::new(10.0, 10.0);
        let out = arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &its,
            DockOrder::Declaration,
            &mut measure,
        );
        assert_eq!(out.placements[0].1, Rect::new(0.0, 0.0, 10.0, 100.0));
        assert_eq!(out.placements[1].1, Rect::new(10.0, 0.0, 90.0, 10.0));
        assert_eq!(out.placements[2].1, Rect::new(90.0, 10.0, 10.0, 90.0));
        assert_eq!(out.placements[3].1, Rect::new(10.0, 90.0, 80.0, 10.0));
        assert_eq!(out.placements[4].1, Rect::new(10.0, 10.0, 80.0, 80.0));
        assert!(out.remaining.is_empty());
        Ok(())
    }

    #[test]
    fn reverse_order_puts_last_nearest_edge() -> Result<()> {
        let id = ids(2);
        let its = vec![item(id[0], Dock::Top), item(id[1], Dock::Top)];
        let mut measure = |_: NodeId, _: Size| Size::new(10.0, 10.0);
        let space = Rect::new(0.0, 0.0, 100.0, 100.0);
        let out = arrange(space, &its, DockOrder::Declaration, &mut measure);
        assert_eq!(out.placements[0], (id[0], Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert_eq!(out.placements[1], (id[1], Rect::new(0.0, 10.0, 100.0, 10.0)));
        let out = arrange(space, &its, DockOrder::Reverse, &mut measure);
        assert_eq!(out.placements[0], (id[1], Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert_eq!(out.placements[1], (id[0], Rect::new(0.0, 10.0, 100.0, 10.0)));
        Ok(())
    }

    #[test]
    fn oversized_edge_is_clamped() -> Result<()> {
        let id = ids(2);
        let mut its = vec![item(id[0], Dock::Top), item(id[1], Dock::Bottom)];
        its[0].layout.margin = Thickness::new(0.0, 5.0, 0.0, 5.0);
        let mut measure = |_: NodeId, _: Size| Size::new(10.0, 80.0);
        let out = arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &its,
            DockOrder::Declaration,
            &mut measure,
        );
        assert_eq!(out.placements[0].1, Rect::new(0.0, 5.0, 100.0, 80.0));
        assert_eq!(out.placements[1].1, Rect::new(0.0, 90.0, 100.0, 10.0));
        assert_eq!(out.remaining.height, 0.0);
        Ok(())
    }

    #[test]
    fn fill_waits_for_later_edges() -> Result<()> {
        let id = ids(3);
        let its = vec![
            item(id[0], Dock::Fill),
            item(id[1], Dock::Left),
            item(id[2], Dock::Bottom),
        ];
        let mut measure = |_: NodeId, _: Size| Size::new(10.0, 10.0);
        let out = arrange(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &its,
            DockOrder::Declaration,
            &mut measure,
        );
        assert_eq!(out.placements[0], (id[1], Rect::new(0.0, 0.0, 10.0, 100.0)));
        assert_eq!(out.placements[1], (id[2], Rect::new(10.0, 90.0, 90.0, 10.0)));
        assert_eq!(out.placements[2], (id[0], Rect::new(10.0, 0.0, 90.0, 90.0)));
        assert!(out.remaining.is_empty());
        Ok(())
    }

    #[test]
    fn preferred_accumulates_edges() -> Result<()> {
        let id = ids(3);
        let its = vec![
            item(id[0], Dock::Top),
            item(id[1], Dock::Left),
            item(id[2], Dock::None),
        ];
        let mut measure = |n: NodeId, _: Size| {
            if n == id[0] {
                Size::new(50.0, 10.0)
            } else {
                Size::new(20.0, 20.0)
            }
        };
        let edges = edges(&its, DockOrder::Declaration, Size::INFINITE, &mut measure);
        let avail = edges.inner_available(Size::INFINITE);
        let pref = edges.wrap(basic::preferred(&edges.rest, avail, &mut measure));
        // Top: 50 wide. Left: 20 wide beside a 20 wide remainder.
        assert_eq!(pref, Size::new(50.0, 30.0));
        Ok(())
    }
}
