//! Geometry primitives used across trellis.
//!
//! All values are `f64` in resolution-independent units. Sizes never go negative:
//! negative and NaN components are coerced to zero when a value is built.

/// Error types for geometry operations.
mod error;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;
/// Directional edge thickness.
mod thickness;

pub use error::{Error, Result};
pub use point::Point;
pub use rect::Rect;
pub use size::Size;
pub use thickness::Thickness;

/// Coerce a length to a valid extent. NaN and negatives become zero, infinity is kept.
pub fn coerce(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// Layout axes, used to write one algorithm for both stacking directions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The extent of a size along this axis.
    pub fn extent(self, s: Size) -> f64 {
        match self {
            Self::Horizontal => s.width,
            Self::Vertical => s.height,
        }
    }

    /// The coordinate of a point along this axis.
    pub fn coord(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    /// The leading edge of a thickness along this axis (left or top).
    pub fn start(self, t: Thickness) -> f64 {
        match self {
            Self::Horizontal => t.left,
            Self::Vertical => t.top,
        }
    }

    /// The trailing edge of a thickness along this axis (right or bottom).
    pub fn end(self, t: Thickness) -> f64 {
        match self {
            Self::Horizontal => t.right,
            Self::Vertical => t.bottom,
        }
    }

    /// Sum of both edges of a thickness along this axis.
    pub fn total(self, t: Thickness) -> f64 {
        self.start(t) + self.end(t)
    }

    /// Build a size from extents along this axis and across it.
    pub fn size(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Build a rectangle from a span along this axis and a span across it.
    pub fn rect(self, main: (f64, f64), cross: (f64, f64)) -> Rect {
        match self {
            Self::Horizontal => Rect::new(main.0, cross.0, main.1, cross.1),
            Self::Vertical => Rect::new(cross.0, main.0, cross.1, main.1),
        }
    }

    /// The (origin, extent) span of a rectangle along this axis.
    pub fn span(self, r: Rect) -> (f64, f64) {
        match self {
            Self::Horizontal => (r.x, r.width),
            Self::Vertical => (r.y, r.height),
        }
    }
}
