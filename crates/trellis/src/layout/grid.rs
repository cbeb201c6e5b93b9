use std::collections::BTreeSet;

use super::{
    GridCell,
    arrange::{Item, Measure, Placement},
    basic,
};
use crate::geom::{Axis, Rect, Size};

/// A child as seen by a grid solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMember {
    /// Cell placement.
    pub cell: GridCell,
    /// Preferred size including margins.
    pub size: Size,
}

/// Computes grid track sizes. Implementations must return one cell rectangle
/// per member, in member order, from `arrange`.
pub trait GridSolver {
    /// The size the whole grid would like to occupy.
    fn measure(&self, members: &[GridMember]) -> Size;

    /// The rectangle covered by each member's cells within `space`.
    fn arrange(&self, space: Rect, members: &[GridMember]) -> Vec<Rect>;
}

/// Auto-sizing grid: every column is as wide as its widest single-span member
/// and every row as tall as its tallest. Members spanning several tracks grow
/// those tracks evenly when they do not fit.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoGridSolver;

/// Track extents along one axis, compacted to the boundaries members use.
///
/// Indices nobody starts or ends at collapse into the segment around them, so
/// a sparse grid costs the same as a dense one with the same members.
struct Tracks {
    /// Distinct track boundaries, ascending.
    bounds: Vec<usize>,
    /// Extent between each pair of consecutive boundaries.
    extents: Vec<f64>,
}

impl Tracks {
    /// Size the tracks along `axis`.
    fn new(axis: Axis, members: &[GridMember]) -> Self {
        let bounds: Vec<usize> = members
            .iter()
            .flat_map(|m| {
                let (i, span) = m.cell.track(axis);
                [i, i + span]
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut tracks = Self {
            extents: vec![0.0; bounds.len().saturating_sub(1)],
            bounds,
        };
        for m in members {
            let (i, span) = m.cell.track(axis);
            if span == 1 {
                let k = tracks.segment(i);
                tracks.extents[k] = tracks.extents[k].max(axis.extent(m.size));
            }
        }
        let mut spanning: Vec<&GridMember> =
            members.iter().filter(|m| m.cell.track(axis).1 > 1).collect();
        spanning.sort_by_key(|m| m.cell.track(axis).1);
        for m in spanning {
            let (i, span) = m.cell.track(axis);
            let (first, last) = (tracks.segment(i), tracks.segment(i + span));
            let have: f64 = tracks.extents[first..last].iter().sum();
            let deficit = axis.extent(m.size) - have;
            if deficit > 0.0 {
                // Spread per track, so a segment grows by its width in tracks.
                for k in first..last {
                    let width = tracks.bounds[k + 1] - tracks.bounds[k];
                    tracks.extents[k] += deficit * width as f64 / span as f64;
                }
            }
        }
        tracks
    }

    /// Position of a boundary index in `bounds`.
    fn segment(&self, index: usize) -> usize {
        self.bounds.partition_point(|b| *b < index)
    }

    /// Sum of all extents.
    fn total(&self) -> f64 {
        self.extents.iter().sum()
    }

    /// Leading offset of every boundary, starting at `origin`.
    fn offsets(&self, origin: f64) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.bounds.len());
        let mut at = origin;
        out.push(at);
        for t in &self.extents {
            at += t;
            out.push(at);
        }
        out
    }

    /// Leading coordinate and extent of the cells `index..index + span`.
    fn cell(&self, offsets: &[f64], index: usize, span: usize) -> (f64, f64) {
        let (first, last) = (offsets[self.segment(index)], offsets[self.segment(index + span)]);
        (first, last - first)
    }
}

impl GridSolver for AutoGridSolver {
    fn measure(&self, members: &[GridMember]) -> Size {
        Size::new(
            Tracks::new(Axis::Horizontal, members).total(),
            Tracks::new(Axis::Vertical, members).total(),
        )
    }

    fn arrange(&self, space: Rect, members: &[GridMember]) -> Vec<Rect> {
        let cols = Tracks::new(Axis::Horizontal, members);
        let rows = Tracks::new(Axis::Vertical, members);
        let (col_at, row_at) = (cols.offsets(space.x), rows.offsets(space.y));
        members
            .iter()
            .map(|m| {
                let c = &m.cell;
                let (x, w) = cols.cell(&col_at, c.column, c.column_span);
                let (y, h) = rows.cell(&row_at, c.row, c.row_span);
                Rect::new(x, y, w, h)
            })
            .collect()
    }
}

/// Measure each child and describe it to the solver.
fn members(items: &[Item], available: Size, measure: &mut Measure<'_>) -> Vec<(Size, GridMember)> {
    items
        .iter()
        .map(|item| {
            let pref = measure(item.id, available);
            let m = item.layout.margin;
            (
                pref,
                GridMember {
                    cell: item.layout.grid,
                    size: pref.grow(m.horizontal(), m.vertical()),
                },
            )
        })
        .collect()
}

/// Place each child inside its cell rectangle using its own alignment.
pub(crate) fn arrange(
    space: Rect,
    items: &[Item],
    solver: &dyn GridSolver,
    measure: &mut Measure<'_>,
) -> Vec<Placement> {
    let measured = members(items, Size::INFINITE, measure);
    let grid: Vec<GridMember> = measured.iter().map(|(_, m)| *m).collect();
    let cells = solver.arrange(space, &grid);
    items
        .iter()
        .zip(measured)
        .zip(cells)
        .map(|((item, (pref, _)), cell)| {
            let (x, w) = basic::place(item, cell, pref, Axis::Horizontal);
            let (y, h) = basic::place(item, cell, pref, Axis::Vertical);
            (item.id, Rect::new(x, y, w, h))
        })
        .collect()
}

/// The solver's measured size for the children.
pub(crate) fn preferred(
    items: &[Item],
    available: Size,
    solver: &dyn GridSolver,
    measure: &mut Measure<'_>,
) -> Size {
    let grid: Vec<GridMember> = members(items, available, measure)
        .into_iter()
        .map(|(_, m)| m)
        .collect();
    solver.measure(&grid)
}
