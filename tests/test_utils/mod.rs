// not every test binary uses every helper
#![allow(dead_code)]

use polybool64::clip::{BooleanSolution, ClipType, Clipper, FillRule, PathType, Paths64};
use polybool64::core::math::Point64;

/// Holds a set of properties of an output ring for comparison in tests.
/// Area is doubled (shoelace sum) and absolute, making comparisons exact and
/// invariant to ring orientation and rotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathProperties {
    pub vertex_count: usize,
    pub abs_area_2x: i128,
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl PathProperties {
    pub fn from_path(path: &[Point64]) -> Self {
        let mut min_x = i64::MAX;
        let mut min_y = i64::MAX;
        let mut max_x = i64::MIN;
        let mut max_y = i64::MIN;
        for p in path {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        PathProperties {
            vertex_count: path.len(),
            abs_area_2x: signed_area_2x(path).abs(),
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

/// Signed shoelace sum of `path` (twice the enclosed area).
pub fn signed_area_2x(path: &[Point64]) -> i128 {
    if path.len() < 3 {
        return 0;
    }
    let mut sum = 0i128;
    let mut prev = path[path.len() - 1];
    for &p in path {
        sum += prev.x as i128 * p.y as i128 - p.x as i128 * prev.y as i128;
        prev = p;
    }
    sum
}

/// Sum of the absolute ring areas (doubled), counting holes as positive.
pub fn total_abs_area_2x(paths: &Paths64) -> i128 {
    paths.iter().map(|p| signed_area_2x(p).abs()).sum()
}

/// Net enclosed area (doubled): holes wind opposite their outers and cancel.
pub fn net_area_2x(paths: &Paths64) -> i128 {
    paths.iter().map(|p| signed_area_2x(p)).sum::<i128>().abs()
}

pub fn create_property_set(paths: &Paths64) -> Vec<PathProperties> {
    let mut set: Vec<_> = paths.iter().map(|p| PathProperties::from_path(p)).collect();
    set.sort();
    set
}

pub fn property_sets_match(result: &[PathProperties], expected: &[PathProperties]) -> bool {
    result.len() == expected.len() && result.iter().zip(expected.iter()).all(|(a, b)| a == b)
}

/// The vertex set of a path, sorted, for rotation/orientation invariant
/// comparison.
pub fn point_set(path: &[Point64]) -> Vec<(i64, i64)> {
    let mut pts: Vec<_> = path.iter().map(|p| (p.x, p.y)).collect();
    pts.sort();
    pts
}

/// Canonical form of a whole solution: every ring as a sorted vertex set,
/// rings sorted among themselves.
pub fn canonical(paths: &Paths64) -> Vec<Vec<(i64, i64)>> {
    let mut rings: Vec<_> = paths.iter().map(|p| point_set(p)).collect();
    rings.sort();
    rings
}

pub fn assert_single_ring(paths: &Paths64, expected: &[(i64, i64)]) {
    assert_eq!(paths.len(), 1, "expected exactly one ring, got {paths:?}");
    let mut expected = expected.to_vec();
    expected.sort();
    assert_eq!(point_set(&paths[0]), expected, "ring points mismatch");
}

/// Run a boolean op over subject/clip path sets.
pub fn run_boolean(
    subjects: &Paths64,
    clips: &Paths64,
    clip_type: ClipType,
    fill_rule: FillRule,
) -> BooleanSolution {
    let mut clipper = Clipper::new();
    clipper
        .add_paths(subjects, PathType::Subject, false)
        .unwrap();
    clipper.add_paths(clips, PathType::Clip, false).unwrap();
    clipper.execute(clip_type, fill_rule).unwrap()
}

/// Run a boolean op with an open subject set alongside closed subjects.
pub fn run_boolean_with_open(
    subjects: &Paths64,
    open_subjects: &Paths64,
    clips: &Paths64,
    clip_type: ClipType,
    fill_rule: FillRule,
) -> BooleanSolution {
    let mut clipper = Clipper::new();
    clipper
        .add_paths(subjects, PathType::Subject, false)
        .unwrap();
    clipper
        .add_paths(open_subjects, PathType::Subject, true)
        .unwrap();
    clipper.add_paths(clips, PathType::Clip, false).unwrap();
    clipper.execute(clip_type, fill_rule).unwrap()
}
