use super::{
    align_span,
    arrange::{Item, Measure, Placement},
};
use crate::geom::{Axis, Rect, Size};

/// Place each child independently inside `space`, resolving each axis from the
/// child's alignment.
pub(crate) fn arrange(space: Rect, items: &[Item], measure: &mut Measure<'_>) -> Vec<Placement> {
    items
        .iter()
        .map(|item| {
            let pref = measure(item.id, space.size());
            let (x, w) = place(item, space, pref, Axis::Horizontal);
            let (y, h) = place(item, space, pref, Axis::Vertical);
            (item.id, Rect::new(x, y, w, h))
        })
        .collect()
}

/// Resolve one axis of a child placed within `space`.
pub(crate) fn place(item: &Item, space: Rect, preferred: Size, axis: Axis) -> (f64, f64) {
    let (origin, available) = axis.span(space);
    align_span(
        origin,
        available,
        axis.extent(preferred),
        item.layout.margins(axis),
        item.layout.alignment(axis),
        item.layout.limits(axis),
    )
}

/// The bounding size of all children at their preferred sizes plus margins.
pub(crate) fn preferred(items: &[Item], available: Size, measure: &mut Measure<'_>) -> Size {
    items.iter().fold(Size::ZERO, |acc, item| {
        let pref = measure(item.id, available);
        let m = item.layout.margin;
        acc.max(pref.grow(m.horizontal(), m.vertical()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        NodeId,
        error::Result,
        geom::Thickness,
        layout::{Alignment, Layout, arrange::tests::ids},
    };

    #[test]
    fn basic_alignment_matrix() -> Result<()> {
        let id = ids(4);
        let items: Vec<Item> = [
            Alignment::Start,
            Alignment::Center,
            Alignment::End,
            Alignment::Stretch,
        ]
        .iter()
        .zip(&id)
        .map(|(a, id)| Item {
            id: *id,
            layout: Layout::basic().align(*a, Alignment::Start),
        })
        .collect();
        let mut measure = |_: NodeId, _: Size| Size::new(20.0, 10.0);
        let out = arrange(Rect::new(0.0, 0.0, 100.0, 50.0), &items, &mut measure);
        assert_eq!(out[0].1, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(out[1].1, Rect::new(40.0, 0.0, 20.0, 10.0));
        assert_eq!(out[2].1, Rect::new(80.0, 0.0, 20.0, 10.0));
        assert_eq!(out[3].1, Rect::new(0.0, 0.0, 100.0, 10.0));
        Ok(())
    }

    #[test]
    fn basic_preferred_includes_margins() -> Result<()> {
        let id = ids(2);
        let items = vec![
            Item {
                id: id[0],
                layout: Layout::basic().margin(Thickness::uniform(5.0)),
            },
            Item {
                id: id[1],
                layout: Layout::basic(),
            },
        ];
        let mut measure = |n: NodeId, _: Size| {
            if n == id[0] {
                Size::new(10.0, 10.0)
            } else {
                Size::new(12.0, 30.0)
            }
        };
        let pref = preferred(&items, Size::INFINITE, &mut measure);
        assert_eq!(pref, Size::new(20.0, 30.0));
        Ok(())
    }
}
