use std::str::FromStr;

use super::error::parse_floats;
use crate::Error;

/// Per-edge thickness, used for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Thickness {
    /// Construct a thickness from individual edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same thickness on every edge.
    pub fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    /// `h` on the left and right edges, `v` on the top and bottom edges.
    pub fn symmetric(h: f64, v: f64) -> Self {
        Self::new(h, v, h, v)
    }

    /// Sum of the left and right edges.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// True if every edge is zero.
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

impl FromStr for Thickness {
    type Err = Error;

    /// Parse one value (uniform), two values (horizontal, vertical) or four
    /// values (left, top, right, bottom).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.split(',').count();
        let v = parse_floats(s, n)?;
        match v.as_slice() {
            [a] => Ok(Self::uniform(*a)),
            [h, v] => Ok(Self::symmetric(*h, *v)),
            [l, t, r, b] => Ok(Self::new(*l, *t, *r, *b)),
            _ => Err(Error::Parse(format!("expected 1, 2 or 4 values in {s:?}"))),
        }
    }
}
