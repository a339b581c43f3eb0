//! k-d tree queries checked against kiddo and brute force.

mod common;

use kiddo::{KdTree, SquaredEuclidean};

use kaksha::index::KdPoint;
use kaksha::{KdTree2D, KdTree3D, Point2D, Point3D};

fn oracle_2d(points: &[Point2D]) -> KdTree<f32, 2> {
    let mut tree: KdTree<f32, 2> = KdTree::new();
    for (i, p) in points.iter().enumerate() {
        tree.add(&[p.x, p.y], i as u64);
    }
    tree
}

fn oracle_3d(points: &[Point3D]) -> KdTree<f32, 3> {
    let mut tree: KdTree<f32, 3> = KdTree::new();
    for (i, p) in points.iter().enumerate() {
        tree.add(&[p.x, p.y, p.z], i as u64);
    }
    tree
}

#[test]
fn test_nearest_2d_matches_kiddo() {
    let points = common::random_points_2d(2000, 11);
    let tree = KdTree2D::build(points.clone());
    let oracle = oracle_2d(&points);

    for q in common::random_points_2d(200, 12) {
        let ours = tree.nearest(&q).unwrap();
        let theirs = oracle.nearest_one::<SquaredEuclidean>(&[q.x, q.y]);
        let expected = points[theirs.item as usize].distance_squared(&q);
        assert_eq!(ours.distance_squared, expected);
    }
}

#[test]
fn test_nearest_3d_matches_kiddo() {
    let points = common::random_points_3d(2000, 13);
    let tree = KdTree3D::build(points.clone());
    let oracle = oracle_3d(&points);

    for q in common::random_points_3d(200, 14) {
        let ours = tree.nearest(&q).unwrap();
        let theirs = oracle.nearest_one::<SquaredEuclidean>(&[q.x, q.y, q.z]);
        let expected = points[theirs.item as usize].distance_squared(&q);
        assert_eq!(ours.distance_squared, expected);
    }
}

#[test]
fn test_k_nearest_matches_kiddo() {
    let points = common::random_points_3d(1500, 15);
    let tree = KdTree3D::build(points.clone());
    let oracle = oracle_3d(&points);

    for q in common::random_points_3d(50, 16) {
        let ours: Vec<f32> = tree
            .k_nearest(&q, 8)
            .iter()
            .map(|n| n.distance_squared)
            .collect();
        let theirs: Vec<f32> = oracle
            .nearest_n::<SquaredEuclidean>(&[q.x, q.y, q.z], 8)
            .iter()
            .map(|n| points[n.item as usize].distance_squared(&q))
            .collect();
        assert_eq!(ours, theirs);
    }
}

#[test]
fn test_radius_query_matches_brute_force() {
    let points = common::random_points_2d(3000, 17);
    let tree = KdTree2D::build(points.clone());

    for (i, q) in common::random_points_2d(40, 18).into_iter().enumerate() {
        let radius = 0.1 + i as f32 * 0.02;
        let mut ours: Vec<(u32, u32)> = tree
            .within_radius(&q, radius)
            .iter()
            .map(|n| (n.point.x.to_bits(), n.point.y.to_bits()))
            .collect();
        let mut expected: Vec<(u32, u32)> = points
            .iter()
            .filter(|p| p.distance_squared(&q) <= radius * radius)
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        ours.sort_unstable();
        expected.sort_unstable();
        assert_eq!(ours, expected);
    }
}

#[test]
fn test_box_query_matches_brute_force() {
    let points = common::random_points_3d(3000, 19);
    let tree = KdTree3D::build(points.clone());
    let min = Point3D::new(-0.5, -2.0, -0.2);
    let max = Point3D::new(1.0, 0.5, 0.9);

    let inside = |p: &Point3D| (0..3).all(|a| p.coord(a) >= min.coord(a) && p.coord(a) <= max.coord(a));
    let expected = points.iter().filter(|p| inside(p)).count();
    let found = tree.within_box(&min, &max);
    assert_eq!(found.len(), expected);
    assert!(found.iter().all(|p| inside(p)));
}

#[test]
fn test_tree_shape_bounds() {
    for n in [1usize, 2, 10, 100, 1000, 5000] {
        let tree = KdTree2D::build(common::random_points_2d(n, n as u64));
        assert_eq!(tree.len(), n);
        let bound = (n as f64).log2().ceil() as usize + 2;
        assert!(tree.depth() <= bound, "n={n}: depth {} > {bound}", tree.depth());
    }
    assert!(KdTree3D::build(Vec::new()).root().is_none());
}

#[test]
fn test_same_input_same_tree() {
    let points = common::random_points_3d(300, 20);
    let a = KdTree3D::build(points.clone());
    let b = KdTree3D::build(points);
    assert_eq!(a.points(), b.points());
}
