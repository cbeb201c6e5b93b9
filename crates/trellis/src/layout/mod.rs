//! Layout attributes and the layout engine.
//!
//! Every node carries a [`Layout`]: its own margin, alignment, dock edge,
//! suggested size and limits, plus the [`LayoutStyle`] it applies to its
//! children. The engine in [`LayoutManager`] turns these into child bounds.

use serde::{Deserialize, Serialize};

use crate::geom::{Axis, Point, Size, Thickness, coerce};

/// Alignment helpers shared by every strategy.
mod align;
/// Strategy dispatch.
mod arrange;
/// Free positioning with alignment.
mod basic;
/// Dock-to-edge strategy.
mod dock;
/// Layout passes over the tree.
mod engine;
/// Grid attributes and solver.
mod grid;
/// Scrollable content.
mod scroll;
/// Vertical and horizontal stacks.
mod stack;

pub use align::{align_span, clamp_axis};
pub use engine::LayoutManager;
pub use grid::{AutoGridSolver, GridMember, GridSolver};

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutStyle {
    /// Each child is placed independently inside the container using its alignment.
    #[default]
    Basic,
    /// Children are stacked top to bottom.
    Vertical,
    /// Children are stacked left to right.
    Horizontal,
    /// Docked children take edges; the rest are placed as in `Basic`.
    Dock,
    /// Children occupy grid cells.
    Grid,
    /// Children keep the bounds they were given. Docked children are still docked.
    Manual,
    /// Children take their unconstrained preferred size and are shifted by the
    /// container's scroll offset.
    Scroll,
}

/// Placement of a child along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Left or top.
    Start,
    /// Centred in the available space.
    Center,
    /// Right or bottom.
    End,
    /// Fill the available space, minus margins.
    #[default]
    Stretch,
    /// In a stack, take whatever the siblings leave along the stacking axis.
    /// Elsewhere the same as `Stretch`.
    Fill,
}

/// Edge a child is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dock {
    /// Not docked.
    #[default]
    None,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Whatever space is left.
    Fill,
}

/// Order in which docked children consume edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockOrder {
    /// First declared child is closest to its edge.
    #[default]
    Declaration,
    /// Last declared child is closest to its edge.
    Reverse,
}

/// Grid placement of a child. Rows and columns count from zero, spans are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
    /// Number of rows covered.
    pub row_span: usize,
    /// Number of columns covered.
    pub column_span: usize,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            row_span: 1,
            column_span: 1,
        }
    }
}

impl GridCell {
    /// Build a cell from raw integers. Indices are clamped to at least zero and
    /// spans to at least one.
    pub fn new(row: i32, column: i32, row_span: i32, column_span: i32) -> Self {
        Self {
            row: row.max(0) as usize,
            column: column.max(0) as usize,
            row_span: row_span.max(1) as usize,
            column_span: column_span.max(1) as usize,
        }
    }

    /// Index and span along an axis: columns for horizontal, rows for vertical.
    pub fn track(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::Horizontal => (self.column, self.column_span),
            Axis::Vertical => (self.row, self.row_span),
        }
    }
}

/// Layout attributes of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// How this node arranges its own children.
    pub style: LayoutStyle,
    /// Space outside the node, inside its parent.
    pub margin: Thickness,
    /// Space inside the node, around its children.
    pub padding: Thickness,
    /// Horizontal placement within the parent.
    pub horizontal: Alignment,
    /// Vertical placement within the parent.
    pub vertical: Alignment,
    /// Dock edge within the parent.
    pub dock: Dock,
    /// Suggested width; `None` lets the engine decide.
    pub width: Option<f64>,
    /// Suggested height; `None` lets the engine decide.
    pub height: Option<f64>,
    /// Minimum width.
    pub min_width: Option<f64>,
    /// Minimum height.
    pub min_height: Option<f64>,
    /// Maximum width.
    pub max_width: Option<f64>,
    /// Maximum height.
    pub max_height: Option<f64>,
    /// Grid placement, used when the parent has the `Grid` style.
    pub grid: GridCell,
    /// Offset applied to children under the `Scroll` style.
    pub scroll_offset: Point,
}

/// Map an optional suggested length, treating NaN as unspecified and
/// clamping negatives to zero.
fn suggested(v: f64) -> Option<f64> {
    if v.is_nan() { None } else { Some(coerce(v)) }
}

impl Layout {
    /// Basic layout with default attributes.
    pub fn basic() -> Self {
        Self::default()
    }

    /// A vertical stack.
    pub fn vertical() -> Self {
        Self::default().style(LayoutStyle::Vertical)
    }

    /// A horizontal stack.
    pub fn horizontal() -> Self {
        Self::default().style(LayoutStyle::Horizontal)
    }

    /// A dock container.
    pub fn dock_panel() -> Self {
        Self::default().style(LayoutStyle::Dock)
    }

    /// A grid container.
    pub fn grid_panel() -> Self {
        Self::default().style(LayoutStyle::Grid)
    }

    /// Set the children layout style.
    pub fn style(mut self, style: LayoutStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the margin.
    pub fn margin(mut self, margin: Thickness) -> Self {
        self.margin = margin;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Thickness) -> Self {
        self.padding = padding;
        self
    }

    /// Set both alignments.
    pub fn align(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    /// Set the dock edge.
    pub fn dock(mut self, dock: Dock) -> Self {
        self.dock = dock;
        self
    }

    /// Set the suggested size. NaN leaves an axis unspecified.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = suggested(width);
        self.height = suggested(height);
        self
    }

    /// Set the minimum size. NaN leaves an axis unbounded.
    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = suggested(width);
        self.min_height = suggested(height);
        self
    }

    /// Set the maximum size. NaN leaves an axis unbounded.
    pub fn max_size(mut self, width: f64, height: f64) -> Self {
        self.max_width = suggested(width);
        self.max_height = suggested(height);
        self
    }

    /// Set the grid cell.
    pub fn cell(mut self, cell: GridCell) -> Self {
        self.grid = cell;
        self
    }

    /// Set the scroll offset.
    pub fn scroll(mut self, offset: Point) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Alignment along an axis.
    pub fn alignment(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Suggested length along an axis.
    pub fn suggested(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Minimum and maximum along an axis.
    pub fn limits(&self, axis: Axis) -> (Option<f64>, Option<f64>) {
        match axis {
            Axis::Horizontal => (self.min_width, self.max_width),
            Axis::Vertical => (self.min_height, self.max_height),
        }
    }

    /// Margin edges along an axis.
    pub fn margins(&self, axis: Axis) -> (f64, f64) {
        (axis.start(self.margin), axis.end(self.margin))
    }

    /// Apply min/max limits to a size.
    pub fn limit(&self, size: Size) -> Size {
        Size::new(
            clamp_axis(size.width, self.min_width, self.max_width),
            clamp_axis(size.height, self.min_height, self.max_height),
        )
    }

    /// Replace each specified axis of `size` with the suggested length.
    pub fn apply_suggested(&self, size: Size) -> Size {
        Size::new(
            self.width.unwrap_or(size.width),
            self.height.unwrap_or(size.height),
        )
    }

    /// True if both axes have a suggested length.
    pub fn is_fully_specified(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}
