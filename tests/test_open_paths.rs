mod test_utils;

use polybool64::clip::{ClipType, Clipper, FillRule, PathType};
use polybool64::core::error::ClipError;
use polybool64::{path64, paths64};
use test_utils::*;

use ClipType::*;
use FillRule::*;

#[test]
fn open_clip_paths_are_rejected() {
    let mut clipper = Clipper::new();
    let result = clipper.add_path(&path64![(0, 0), (10, 0)], PathType::Clip, true);
    assert_eq!(result, Err(ClipError::OpenClipPath));
    // closed clip paths and open subjects are fine
    clipper
        .add_path(&path64![(0, 0), (10, 0), (5, 5)], PathType::Clip, false)
        .unwrap();
    clipper
        .add_path(&path64![(0, 0), (10, 0)], PathType::Subject, true)
        .unwrap();
}

#[test]
fn horizontal_polyline_clipped_by_square() {
    let open = paths64![[(-5, 5), (15, 5)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Intersection, EvenOdd);
    assert!(result.closed_paths.is_empty());
    assert_eq!(result.open_paths.len(), 1);
    assert_eq!(point_set(&result.open_paths[0]), vec![(0, 5), (10, 5)]);
}

#[test]
fn vertical_polyline_clipped_by_square() {
    let open = paths64![[(5, -5), (5, 15)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Intersection, EvenOdd);
    assert_eq!(result.open_paths.len(), 1);
    assert_eq!(point_set(&result.open_paths[0]), vec![(5, 0), (5, 10)]);
}

#[test]
fn polyline_inside_square_passes_through() {
    let open = paths64![[(2, 5), (8, 5)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Intersection, EvenOdd);
    assert_eq!(result.open_paths.len(), 1);
    assert_eq!(point_set(&result.open_paths[0]), vec![(2, 5), (8, 5)]);
}

#[test]
fn polyline_outside_square_intersection_is_empty() {
    let open = paths64![[(20, 0), (20, 10)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Intersection, EvenOdd);
    assert!(result.open_paths.is_empty());
}

#[test]
fn polyline_outside_square_survives_union() {
    let open = paths64![[(20, 0), (20, 10)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Union, EvenOdd);
    assert_eq!(result.open_paths.len(), 1);
    assert_eq!(point_set(&result.open_paths[0]), vec![(20, 0), (20, 10)]);
    // the closed clip square is still part of the union
    assert_eq!(total_abs_area_2x(&result.closed_paths), 2 * 100);
}

#[test]
fn polyline_crossing_square_twice() {
    // enters, leaves, and the middle stays clipped out
    let open = paths64![[(-5, 3), (15, 3)], [(-5, 7), (15, 7)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Intersection, EvenOdd);
    assert_eq!(result.open_paths.len(), 2);
    assert_eq!(
        canonical(&result.open_paths),
        vec![vec![(0, 3), (10, 3)], vec![(0, 7), (10, 7)]]
    );
}

#[test]
fn open_difference_keeps_outside_segments() {
    let open = paths64![[(-5, 5), (15, 5)]];
    let clips = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let result = run_boolean_with_open(&paths64![], &open, &clips, Difference, EvenOdd);
    assert_eq!(result.open_paths.len(), 2);
    assert_eq!(
        canonical(&result.open_paths),
        vec![vec![(-5, 5), (0, 5)], vec![(10, 5), (15, 5)]]
    );
}

#[test]
fn mixed_open_and_closed_subjects() {
    let subjects = paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]];
    let open = paths64![[(-5, 5), (15, 5)]];
    let clips = paths64![[(5, 0), (20, 0), (20, 10), (5, 10)]];
    let result = run_boolean_with_open(&subjects, &open, &clips, Intersection, EvenOdd);
    // closed part: [5,10] x [0,10]
    assert_eq!(total_abs_area_2x(&result.closed_paths), 2 * 50);
    // open part: the polyline clipped to the clip square
    assert_eq!(result.open_paths.len(), 1);
    assert_eq!(point_set(&result.open_paths[0]), vec![(5, 5), (15, 5)]);
}
