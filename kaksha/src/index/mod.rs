//! Balanced k-d trees over room-frame points.
//!
//! - [`KdTree`]: median-split tree, generic over [`KdPoint`], with 2D and
//!   3D aliases.
//! - [`PointIndex`]: holds both variants built from one frame.

mod point_index;
mod tree;

pub use point_index::{IndexConfig, PointIndex};
pub use tree::{KdNode, KdPoint, KdTree, KdTree2D, KdTree3D, Neighbor};
