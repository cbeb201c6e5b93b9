use super::{Point, Size, Thickness, coerce};

/// A rectangle with a location and a non-negative size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
}

impl Rect {
    /// Construct a rectangle, clamping a negative or NaN size to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: if x.is_nan() { 0.0 } else { x },
            y: if y.is_nan() { 0.0 } else { y },
            width: coerce(width),
            height: coerce(height),
        }
    }

    /// Construct a rectangle from a location and a size.
    pub fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// The top-left corner.
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Does this rectangle contain the point? The right and bottom edges are exclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose `other`?
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink by a thickness. The result never has a negative size.
    pub fn deflate(&self, t: Thickness) -> Self {
        Self::new(
            self.x + t.left,
            self.y + t.top,
            self.width - t.horizontal(),
            self.height - t.vertical(),
        )
    }

    /// Grow by a thickness.
    pub fn inflate(&self, t: Thickness) -> Self {
        Self::new(
            self.x - t.left,
            self.y - t.top,
            self.width + t.horizontal(),
            self.height + t.vertical(),
        )
    }

    /// Shift the rectangle by an offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// A rectangle with the same location and a new size.
    pub fn with_size(&self, size: Size) -> Self {
        Self::from_parts(self.location(), size)
    }

    /// The overlapping region, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r <= x || b <= y {
            None
        } else {
            Some(Self::new(x, y, r - x, b - y))
        }
    }

    /// The smallest rectangle enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Self::new(x, y, r - x, b - y)
    }

    /// Snap to the device pixel grid at `scale` and convert back. Edges are rounded
    /// independently so adjacent rectangles stay adjacent.
    pub fn snap_to_pixels(&self, scale: f64) -> Self {
        if scale <= 0.0 || !scale.is_finite() {
            return *self;
        }
        let l = (self.x * scale).round();
        let t = (self.y * scale).round();
        let r = (self.right() * scale).round();
        let b = (self.bottom() * scale).round();
        Self::new(l / scale, t / scale, (r - l) / scale, (b - t) / scale)
    }
}

impl From<Size> for Rect {
    fn from(s: Size) -> Self {
        s.rect()
    }
}
