use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D point with 64-bit integer coordinates.
///
/// The y axis is inverted: smaller `y` values are visually higher. All
/// "up"/"down" language in this crate is relative to the inverted axis, so
/// an edge going up has decreasing `y`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Point64 {
    pub x: i64,
    pub y: i64,
}

impl Point64 {
    /// Create a new point with x and y coordinates.
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Point64 { x, y }
    }
}

impl From<(i64, i64)> for Point64 {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Point64 { x, y }
    }
}

impl fmt::Display for Point64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis-aligned rectangle with 64-bit integer coordinates.
///
/// Under the inverted y axis `top <= bottom` for a non-empty rect.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rect64 {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect64 {
    #[inline]
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Rect64 {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Grow the rect to contain `pt`.
    #[inline]
    pub fn expand_to(&mut self, pt: Point64) {
        if pt.x < self.left {
            self.left = pt.x;
        }
        if pt.x > self.right {
            self.right = pt.x;
        }
        if pt.y < self.top {
            self.top = pt.y;
        }
        if pt.y > self.bottom {
            self.bottom = pt.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_display() {
        assert_eq!(Point64::new(-3, 7).to_string(), "(-3,7)");
    }

    #[test]
    fn rect_expand() {
        let mut r = Rect64::new(0, 0, 0, 0);
        r.expand_to(Point64::new(5, -2));
        r.expand_to(Point64::new(-1, 9));
        assert_eq!(r, Rect64::new(-1, -2, 5, 9));
    }
}
