//! Core/common math for 64-bit integer points, rectangles, and rounding.
mod point;

pub use point::{Point64, Rect64};

/// Round to the nearest integer, breaking ties away from zero, e.g. `2.5`
/// becomes `3` and `-2.5` becomes `-3`.
///
/// # Examples
///
/// ```
/// # use polybool64::core::math::*;
/// assert_eq!(round_half_away(2.5), 3);
/// assert_eq!(round_half_away(-2.5), -3);
/// assert_eq!(round_half_away(2.4), 2);
/// assert_eq!(round_half_away(-2.4), -2);
/// ```
#[inline]
pub fn round_half_away(val: f64) -> i64 {
    if val < 0.0 {
        (val - 0.5) as i64
    } else {
        (val + 0.5) as i64
    }
}
