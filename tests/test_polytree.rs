mod test_utils;

use polybool64::clip::{ClipType, Clipper, FillRule, PathType};
use polybool64::core::error::ClipError;
use polybool64::paths64;
use test_utils::*;

#[test]
fn square_with_hole_builds_two_level_tree() {
    // outer square with an opposite wound inner ring, unioned with the same
    // outer square: one outer ring containing one hole
    let mut clipper = Clipper::new();
    clipper
        .add_paths(
            &paths64![
                [(0, 0), (100, 0), (100, 100), (0, 100)],
                [(25, 75), (75, 75), (75, 25), (25, 25)]
            ],
            PathType::Subject,
            false,
        )
        .unwrap();
    clipper
        .add_paths(
            &paths64![[(0, 0), (100, 0), (100, 100), (0, 100)]],
            PathType::Clip,
            false,
        )
        .unwrap();

    let solution = clipper
        .execute_tree(ClipType::Union, FillRule::NonZero)
        .unwrap();
    let tree = &solution.tree;
    assert!(solution.open_paths.is_empty());
    assert_eq!(tree.len(), 2);

    assert_eq!(tree.child_count(tree.root()), 1);
    let outer = tree.child(tree.root(), 0).unwrap();
    assert!(!tree.is_hole(outer));
    assert_eq!(
        point_set(tree.path(outer)),
        vec![(0, 0), (0, 100), (100, 0), (100, 100)]
    );

    assert_eq!(tree.child_count(outer), 1);
    let hole = tree.child(outer, 0).unwrap();
    assert!(tree.is_hole(hole));
    assert_eq!(
        point_set(tree.path(hole)),
        vec![(25, 25), (25, 75), (75, 25), (75, 75)]
    );
    assert_eq!(tree.parent(hole), Some(outer));

    // hole winds against its outer, so the net area is outline minus hole
    assert_eq!(
        signed_area_2x(tree.path(outer)) + signed_area_2x(tree.path(hole)),
        signed_area_2x(tree.path(outer)).signum() * 2 * (10000 - 2500)
    );
}

#[test]
fn tree_child_range_is_checked() {
    let mut clipper = Clipper::new();
    clipper
        .add_paths(
            &paths64![[(0, 0), (10, 0), (10, 10), (0, 10)]],
            PathType::Subject,
            false,
        )
        .unwrap();
    let solution = clipper
        .execute_tree(ClipType::Union, FillRule::EvenOdd)
        .unwrap();
    let tree = &solution.tree;
    assert_eq!(tree.child_count(tree.root()), 1);
    assert_eq!(
        tree.child(tree.root(), 5),
        Err(ClipError::ChildIndexOutOfRange { index: 5, count: 1 })
    );
}

#[test]
fn disjoint_rings_are_siblings() {
    let mut clipper = Clipper::new();
    clipper
        .add_paths(
            &paths64![
                [(0, 0), (10, 0), (10, 10), (0, 10)],
                [(20, 0), (30, 0), (30, 10), (20, 10)]
            ],
            PathType::Subject,
            false,
        )
        .unwrap();
    let solution = clipper
        .execute_tree(ClipType::Union, FillRule::NonZero)
        .unwrap();
    let tree = &solution.tree;
    assert_eq!(tree.child_count(tree.root()), 2);
    for i in 0..2 {
        let child = tree.child(tree.root(), i).unwrap();
        assert!(!tree.is_hole(child));
        assert_eq!(tree.child_count(child), 0);
    }
}

#[test]
fn empty_execute_returns_empty_tree() {
    let mut clipper = Clipper::new();
    let solution = clipper
        .execute_tree(ClipType::Intersection, FillRule::EvenOdd)
        .unwrap();
    assert!(solution.tree.is_empty());
    assert_eq!(solution.tree.child_count(solution.tree.root()), 0);
}
