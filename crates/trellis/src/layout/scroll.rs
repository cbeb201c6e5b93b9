use super::{
    Alignment, align_span,
    arrange::{Item, Measure, Placement},
};
use crate::geom::{Axis, Point, Rect, Size};

/// Place each child at its unconstrained preferred size, shifted by `offset`.
///
/// Position is resolved from the child's alignment against its preferred size
/// within `space`. A child larger than the viewport along an axis is pinned to
/// the leading edge on that axis so the overflow can be scrolled into view.
pub(crate) fn arrange(
    space: Rect,
    items: &[Item],
    offset: Point,
    measure: &mut Measure<'_>,
) -> Vec<Placement> {
    items
        .iter()
        .map(|item| {
            let bounded = measure(item.id, space.size());
            let content = measure(item.id, Size::INFINITE);
            let x = origin(item, space, bounded, content, Axis::Horizontal);
            let y = origin(item, space, bounded, content, Axis::Vertical);
            (
                item.id,
                Rect::new(x + offset.x, y + offset.y, content.width, content.height),
            )
        })
        .collect()
}

/// Leading coordinate of a scrolled child along one axis.
fn origin(item: &Item, space: Rect, bounded: Size, content: Size, axis: Axis) -> f64 {
    let (origin, available) = axis.span(space);
    let align = if axis.extent(content) > available {
        Alignment::Start
    } else {
        item.layout.alignment(axis)
    };
    align_span(
        origin,
        available,
        axis.extent(bounded),
        item.layout.margins(axis),
        align,
        item.layout.limits(axis),
    )
    .0
}
