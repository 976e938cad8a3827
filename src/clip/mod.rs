//! This module has the clipping engine and all types associated with boolean
//! operations on paths: clip/fill rule selection, flat and tree-shaped
//! solutions, and the path aliases used throughout the crate.
mod active;
mod engine;
mod horizontal;
mod intersect;
mod outrec;
mod polytree;
mod vertex;
mod winding;

pub use engine::{BooleanSolution, Clipper, TreeSolution};
pub use polytree::{PolyNodeIdx, PolyTree};

use crate::core::math::Point64;

/// Sequence of points forming either a closed polygon ring or an open
/// polyline, depending on how it is added to the [Clipper].
pub type Path64 = Vec<Point64>;

/// Collection of [Path64] paths.
pub type Paths64 = Vec<Path64>;

/// Whether a path belongs to the subject or the clip input set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathType {
    #[default]
    Subject,
    Clip,
}

/// The boolean operation to perform between subject and clip sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipType {
    #[default]
    Intersection,
    Union,
    Difference,
    Xor,
}

/// Maps winding counts to filled regions for self-intersecting and
/// overlapping inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// A region is filled when its winding count is odd.
    #[default]
    EvenOdd,
    /// A region is filled when its winding count is non-zero.
    NonZero,
    /// A region is filled when its winding count is greater than zero.
    Positive,
    /// A region is filled when its winding count is less than zero.
    Negative,
}
