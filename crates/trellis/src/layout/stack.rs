use super::{
    Alignment, align_span, clamp_axis,
    arrange::{Item, Measure, Placement},
};
use crate::geom::{Axis, Rect, Size};

/// One child's resolved extent along the stacking axis, margins included.
struct Slot {
    /// Leading margin.
    lead: f64,
    /// Preferred extent.
    extent: f64,
    /// Trailing margin.
    trail: f64,
    /// Preferred size, kept for the cross axis.
    preferred: Size,
}

impl Slot {
    /// Total span consumed, margins included.
    fn span(&self) -> f64 {
        self.lead + self.extent + self.trail
    }
}

/// Available size for measuring a stacked child: unbounded along the stack.
fn stack_available(axis: Axis, space: Size) -> Size {
    axis.size(f64::INFINITY, axis.cross().extent(space))
}

/// Stack children along `axis` in declaration order.
///
/// `Start`, `Stretch` and `Fill` children advance from the leading edge, `End`
/// children pack against the trailing edge with the last declared child
/// nearest the edge, and `Center` children are grouped and centred in whatever
/// is left between the two. `Fill` children share equally whatever the other
/// children leave along the axis.
pub(crate) fn arrange(
    axis: Axis,
    space: Rect,
    items: &[Item],
    measure: &mut Measure<'_>,
) -> Vec<Placement> {
    let cross = axis.cross();
    let (m_origin, m_len) = axis.span(space);
    let (c_origin, c_len) = cross.span(space);
    let avail = stack_available(axis, space.size());

    let mut slots: Vec<Slot> = items
        .iter()
        .map(|item| {
            let preferred = measure(item.id, avail);
            let (lead, trail) = item.layout.margins(axis);
            Slot {
                lead,
                extent: axis.extent(preferred),
                trail,
                preferred,
            }
        })
        .collect();

    let is_fill = |item: &Item| item.layout.alignment(axis) == Alignment::Fill;
    let fills = items.iter().filter(|item| is_fill(*item)).count();
    if fills > 0 {
        let used: f64 = items
            .iter()
            .zip(&slots)
            .filter(|(item, _)| !is_fill(*item))
            .map(|(_, slot)| slot.span())
            .sum();
        let share = ((m_len - used) / fills as f64).max(0.0);
        for (item, slot) in items.iter().zip(slots.iter_mut()) {
            if is_fill(item) {
                let (min, max) = item.layout.limits(axis);
                slot.extent = clamp_axis(share - slot.lead - slot.trail, min, max);
            }
        }
    }

    let mut main = vec![0.0; items.len()];

    let mut head = m_origin;
    for (i, item) in items.iter().enumerate() {
        if matches!(
            item.layout.alignment(axis),
            Alignment::Start | Alignment::Stretch | Alignment::Fill
        ) {
            main[i] = head + slots[i].lead;
            head += slots[i].span();
        }
    }

    let mut tail = m_origin + m_len;
    for (i, item) in items.iter().enumerate().rev() {
        if item.layout.alignment(axis) == Alignment::End {
            main[i] = tail - slots[i].trail - slots[i].extent;
            tail -= slots[i].span();
        }
    }

    let centred: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.layout.alignment(axis) == Alignment::Center)
        .map(|(i, _)| i)
        .collect();
    let total: f64 = centred.iter().map(|i| slots[*i].span()).sum();
    let mut cursor = head + ((tail - head - total) / 2.0).max(0.0);
    for i in centred {
        main[i] = cursor + slots[i].lead;
        cursor += slots[i].span();
    }

    items
        .iter()
        .zip(slots)
        .zip(main)
        .map(|((item, slot), m)| {
            let c = align_span(
                c_origin,
                c_len,
                cross.extent(slot.preferred),
                item.layout.margins(cross),
                item.layout.alignment(cross),
                item.layout.limits(cross),
            );
            (item.id, axis.rect((m, slot.extent), c))
        })
        .collect()
}

/// Sum of extents along `axis` and the largest extent across it, margins included.
pub(crate) fn preferred(
    axis: Axis,
    items: &[Item],
    available: Size,
    measure: &mut Measure<'_>,
) -> Size {
    let cross = axis.cross();
    let avail = stack_available(axis, available);
    let (main, across) = items.iter().fold((0.0, 0.0_f64), |(main, across), item| {
        let pref = measure(item.id, avail);
        (
            main + axis.extent(pref) + axis.total(item.layout.margin),
            across.max(cross.extent(pref) + cross.total(item.layout.margin)),
        )
    });
    axis.size(main, across)
}
