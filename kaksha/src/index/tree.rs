//! Median-split k-d tree over a single backing array.
//!
//! Construction reorders the input in place: every subtree occupies a
//! contiguous range whose middle element (`len / 2`) is the subtree's root,
//! with the left subtree before it and the right subtree after it. The
//! split axis cycles with depth (`depth % DIM`). At each level the range is
//! partially ordered with `select_nth_unstable_by`, so the root holds the
//! value-median on its axis; left elements compare `<=` and right
//! elements `>=` on that axis.
//!
//! The tree is immutable once built. Storage order equals in-order
//! traversal order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::{Point2D, Point3D};

/// A point with a fixed number of axes.
pub trait KdPoint: Copy {
    /// Number of axes.
    const DIM: usize;

    /// Coordinate along `axis` (`0..DIM`).
    fn coord(&self, axis: usize) -> f32;

    /// Squared euclidean distance.
    fn distance_squared(&self, other: &Self) -> f32;
}

impl KdPoint for Point2D {
    const DIM: usize = 2;

    #[inline]
    fn coord(&self, axis: usize) -> f32 {
        match axis {
            0 => self.x,
            _ => self.y,
        }
    }

    #[inline]
    fn distance_squared(&self, other: &Self) -> f32 {
        Point2D::distance_squared(self, other)
    }
}

impl KdPoint for Point3D {
    const DIM: usize = 3;

    #[inline]
    fn coord(&self, axis: usize) -> f32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    fn distance_squared(&self, other: &Self) -> f32 {
        Point3D::distance_squared(self, other)
    }
}

/// A query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<P> {
    /// Stored point
    pub point: P,
    /// Squared distance to the query
    pub distance_squared: f32,
}

impl<P> Neighbor<P> {
    /// Distance to the query.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance_squared.sqrt()
    }
}

/// Balanced k-d tree.
#[derive(Debug, Clone)]
pub struct KdTree<P> {
    points: Vec<P>,
}

/// 2D tree over flat-map projections.
pub type KdTree2D = KdTree<Point2D>;

/// 3D tree over the room-frame cloud.
pub type KdTree3D = KdTree<Point3D>;

impl<P: KdPoint> KdTree<P> {
    /// Build a tree from a point set. An empty set builds an empty tree.
    pub fn build(mut points: Vec<P>) -> Self {
        split(&mut points, 0);
        Self { points }
    }

    /// Number of stored points (equals the node count).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of levels: `ceil(log2(n + 1))`, 0 when empty.
    #[inline]
    pub fn depth(&self) -> usize {
        (usize::BITS - self.points.len().leading_zeros()) as usize
    }

    /// Root node, `None` for an empty tree.
    pub fn root(&self) -> Option<KdNode<'_, P>> {
        KdNode::new(&self.points, 0)
    }

    /// Stored points in in-order traversal order.
    #[inline]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Iterate stored points in in-order traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    /// Closest stored point to `query`.
    pub fn nearest(&self, query: &P) -> Option<Neighbor<P>> {
        let mut best = None;
        nearest_in(&self.points, 0, query, &mut best);
        best
    }

    /// Up to `k` closest stored points, nearest first.
    pub fn k_nearest(&self, query: &P, k: usize) -> Vec<Neighbor<P>> {
        if k == 0 {
            return Vec::new();
        }
        let mut heap = BinaryHeap::with_capacity(k + 1);
        k_nearest_in(&self.points, 0, query, k, &mut heap);
        heap.into_sorted_vec()
            .into_iter()
            .map(|entry| entry.0)
            .collect()
    }

    /// Every stored point within `radius` of `query` (inclusive).
    pub fn within_radius(&self, query: &P, radius: f32) -> Vec<Neighbor<P>> {
        let mut found = Vec::new();
        if radius >= 0.0 {
            radius_in(&self.points, 0, query, radius, &mut found);
        }
        found
    }

    /// Every stored point inside the axis-aligned box `[min, max]` (inclusive).
    pub fn within_box(&self, min: &P, max: &P) -> Vec<P> {
        let mut found = Vec::new();
        box_in(&self.points, 0, min, max, &mut found);
        found
    }
}

impl<'a, P: KdPoint> IntoIterator for &'a KdTree<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowed view of one node and its subtree.
#[derive(Debug, Clone, Copy)]
pub struct KdNode<'a, P> {
    range: &'a [P],
    depth: usize,
}

impl<'a, P: KdPoint> KdNode<'a, P> {
    fn new(range: &'a [P], depth: usize) -> Option<Self> {
        (!range.is_empty()).then_some(Self { range, depth })
    }

    /// The node's point.
    #[inline]
    pub fn location(&self) -> &'a P {
        &self.range[self.range.len() / 2]
    }

    /// Split axis of this node.
    #[inline]
    pub fn axis(&self) -> usize {
        self.depth % P::DIM
    }

    /// Depth of this node (root = 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Nodes in this subtree, including this one.
    #[inline]
    pub fn subtree_len(&self) -> usize {
        self.range.len()
    }

    /// Left child (values `<=` on this node's axis).
    pub fn left(&self) -> Option<KdNode<'a, P>> {
        KdNode::new(&self.range[..self.range.len() / 2], self.depth + 1)
    }

    /// Right child (values `>=` on this node's axis).
    pub fn right(&self) -> Option<KdNode<'a, P>> {
        KdNode::new(&self.range[self.range.len() / 2 + 1..], self.depth + 1)
    }
}

fn split<P: KdPoint>(range: &mut [P], depth: usize) {
    if range.len() <= 1 {
        return;
    }
    let axis = depth % P::DIM;
    let mid = range.len() / 2;
    range.select_nth_unstable_by(mid, |a, b| a.coord(axis).total_cmp(&b.coord(axis)));
    let (left, rest) = range.split_at_mut(mid);
    split(left, depth + 1);
    split(&mut rest[1..], depth + 1);
}

/// Root, then (near, far) children relative to `query`, and the signed
/// axis offset from the root's splitting plane.
#[inline]
fn descend<'a, P: KdPoint>(range: &'a [P], depth: usize, query: &P) -> (&'a P, &'a [P], &'a [P], f32) {
    let mid = range.len() / 2;
    let node = &range[mid];
    let axis = depth % P::DIM;
    let diff = query.coord(axis) - node.coord(axis);
    let (left, right) = (&range[..mid], &range[mid + 1..]);
    if diff < 0.0 {
        (node, left, right, diff)
    } else {
        (node, right, left, diff)
    }
}

fn nearest_in<P: KdPoint>(range: &[P], depth: usize, query: &P, best: &mut Option<Neighbor<P>>) {
    if range.is_empty() {
        return;
    }
    let (node, near, far, diff) = descend(range, depth, query);

    let d2 = node.distance_squared(query);
    if best.as_ref().is_none_or(|b| d2 < b.distance_squared) {
        *best = Some(Neighbor {
            point: *node,
            distance_squared: d2,
        });
    }

    nearest_in(near, depth + 1, query, best);
    if best.as_ref().is_none_or(|b| diff * diff < b.distance_squared) {
        nearest_in(far, depth + 1, query, best);
    }
}

/// Max-heap entry keyed on distance.
struct ByDistance<P>(Neighbor<P>);

impl<P> PartialEq for ByDistance<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P> Eq for ByDistance<P> {}

impl<P> PartialOrd for ByDistance<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for ByDistance<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.distance_squared.total_cmp(&other.0.distance_squared)
    }
}

fn k_nearest_in<P: KdPoint>(
    range: &[P],
    depth: usize,
    query: &P,
    k: usize,
    heap: &mut BinaryHeap<ByDistance<P>>,
) {
    if range.is_empty() {
        return;
    }
    let (node, near, far, diff) = descend(range, depth, query);

    let d2 = node.distance_squared(query);
    if heap.len() < k {
        heap.push(ByDistance(Neighbor {
            point: *node,
            distance_squared: d2,
        }));
    } else if heap.peek().is_some_and(|worst| d2 < worst.0.distance_squared) {
        heap.pop();
        heap.push(ByDistance(Neighbor {
            point: *node,
            distance_squared: d2,
        }));
    }

    k_nearest_in(near, depth + 1, query, k, heap);
    let worst = heap.peek().map_or(f32::INFINITY, |w| w.0.distance_squared);
    if heap.len() < k || diff * diff < worst {
        k_nearest_in(far, depth + 1, query, k, heap);
    }
}

fn radius_in<P: KdPoint>(range: &[P], depth: usize, query: &P, radius: f32, found: &mut Vec<Neighbor<P>>) {
    if range.is_empty() {
        return;
    }
    let (node, near, far, diff) = descend(range, depth, query);

    let d2 = node.distance_squared(query);
    if d2 <= radius * radius {
        found.push(Neighbor {
            point: *node,
            distance_squared: d2,
        });
    }

    radius_in(near, depth + 1, query, radius, found);
    if diff.abs() <= radius {
        radius_in(far, depth + 1, query, radius, found);
    }
}

fn box_in<P: KdPoint>(range: &[P], depth: usize, min: &P, max: &P, found: &mut Vec<P>) {
    if range.is_empty() {
        return;
    }
    let mid = range.len() / 2;
    let node = &range[mid];
    let axis = depth % P::DIM;

    if (0..P::DIM).all(|a| node.coord(a) >= min.coord(a) && node.coord(a) <= max.coord(a)) {
        found.push(*node);
    }
    if min.coord(axis) <= node.coord(axis) {
        box_in(&range[..mid], depth + 1, min, max, found);
    }
    if max.coord(axis) >= node.coord(axis) {
        box_in(&range[mid + 1..], depth + 1, min, max, found);
    }
}
