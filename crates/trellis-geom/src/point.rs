use std::ops::{Add, Sub};

/// A location in resolution-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Shift the point by an offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Convert to device pixels, rounding to the nearest pixel.
    pub fn to_pixels(&self, scale: f64) -> (i64, i64) {
        ((self.x * scale).round() as i64, (self.y * scale).round() as i64)
    }

    /// Convert from device pixels.
    pub fn from_pixels(x: i64, y: i64, scale: f64) -> Self {
        if scale <= 0.0 {
            return Self::zero();
        }
        Self {
            x: x as f64 / scale,
            y: y as f64 / scale,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}
