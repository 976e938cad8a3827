//! 2D polygon clipping library computing boolean operations (intersection,
//! union, difference, xor) on paths with 64-bit integer coordinates, using a
//! single-pass plane sweep. Handles self-intersecting and overlapping inputs
//! under even-odd, non-zero, positive, and negative fill rules, open
//! (polyline) subjects, and flat or hierarchical (outer/hole) output.

#[macro_use]
mod macros;
pub mod clip;
pub mod core;
