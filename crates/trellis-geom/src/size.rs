use std::str::FromStr;

use super::{Rect, coerce, error::parse_floats};
use crate::Error;

/// A `Size` is a rectangle that has a width and height but no location.
/// Components are always non-negative; infinity is allowed and means "unbounded".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// A zero-valued size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// An unbounded size, used as "no constraint" when measuring.
    pub const INFINITE: Self = Self {
        width: f64::INFINITY,
        height: f64::INFINITY,
    };

    /// Construct a size, clamping negative and NaN components to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: coerce(width),
            height: coerce(height),
        }
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The area of this size.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// Component-wise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Component-wise minimum.
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Shrink by a delta on each axis, never going below zero.
    pub fn shrink(&self, dw: f64, dh: f64) -> Self {
        Self::new(self.width - dw, self.height - dh)
    }

    /// Grow by a delta on each axis.
    pub fn grow(&self, dw: f64, dh: f64) -> Self {
        Self::new(self.width + dw, self.height + dh)
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        r.size()
    }
}

impl From<(f64, f64)> for Size {
    fn from(v: (f64, f64)) -> Self {
        Self::new(v.0, v.1)
    }
}

impl FromStr for Size {
    type Err = Error;

    /// Parse `"width,height"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = parse_floats(s, 2)?;
        Ok(Self::new(v[0], v[1]))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Result;

    #[test]
    fn negative_is_clamped() -> Result<()> {
        assert_eq!(Size::new(-5.0, 3.0), Size::new(0.0, 3.0));
        assert_eq!(Size::new(f64::NAN, -1.0), Size::ZERO);
        assert!(Size::new(0.0, 3.0).is_empty());
        Ok(())
    }

    #[test]
    fn parse() -> Result<()> {
        assert_eq!("10, 20".parse::<Size>()?, Size::new(10.0, 20.0));
        assert!("10".parse::<Size>().is_err());
        assert!("a,b".parse::<Size>().is_err());
        Ok(())
    }

    #[test]
    fn shrink_saturates() -> Result<()> {
        assert_eq!(Size::new(5.0, 5.0).shrink(10.0, 2.0), Size::new(0.0, 3.0));
        Ok(())
    }

    proptest! {
        #[test]
        fn components_never_negative(w in -1e6f64..1e6, h in -1e6f64..1e6) {
            let s = Size::new(w, h);
            prop_assert!(s.width >= 0.0);
            prop_assert!(s.height >= 0.0);
        }
    }
}
