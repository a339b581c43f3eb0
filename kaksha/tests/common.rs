//! Test utilities for kaksha integration tests.

#![allow(dead_code)]

use std::f32::consts::FRAC_PI_2;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use kaksha::sim::Aabb;
use kaksha::{
    Color, DepthFrame, DepthMapper, KakshaConfig, Point2D, Point3D, SimulationConfig,
    SyntheticRoom, ZBand,
};

/// Configuration for a tiny `width × height` sensor at the room origin,
/// reliable depth [500, 4000] mm, with a band below and a band at or
/// above camera height.
pub fn small_config(width: usize, height: usize) -> KakshaConfig {
    let mut config = KakshaConfig::default();
    config.sensor.frame_width = width;
    config.sensor.frame_height = height;
    config.sensor.min_reliable_depth_mm = Some(500);
    config.sensor.max_reliable_depth_mm = 4000;
    config.camera.x = 0.0;
    config.camera.y = 0.0;
    config.camera.z = 0.0;
    config.camera.yaw = FRAC_PI_2;
    config.bands = vec![
        ZBand::new("below", -1.0, 0.0, Color::BLUE),
        ZBand::new("level", 0.0, 1.0, Color::GREEN),
    ];
    config
}

/// Pipeline over [`small_config`].
pub fn small_mapper(width: usize, height: usize) -> DepthMapper {
    DepthMapper::from_config(&small_config(width, height)).unwrap()
}

/// Uniform frame at `timestamp_us`.
pub fn uniform_frame(width: usize, height: usize, depth: u16, timestamp_us: u64) -> DepthFrame {
    DepthFrame::uniform(width, height, depth, 500).with_timestamp(timestamp_us)
}

/// Noise-free synthetic room seen from the configured camera.
pub fn synthetic_room(config: &KakshaConfig) -> SyntheticRoom {
    SyntheticRoom::new(
        SimulationConfig::default(),
        config.sensor.to_intrinsics(),
        config.camera.to_pose(),
    )
}

/// Uniformly distributed 2D points.
pub fn random_points_2d(n: usize, seed: u64) -> Vec<Point2D> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point2D::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)))
        .collect()
}

/// Uniformly distributed 3D points.
pub fn random_points_3d(n: usize, seed: u64) -> Vec<Point3D> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point3D::new(
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
                rng.random_range(-1.0..1.8),
            )
        })
        .collect()
}

/// Distance from `p` to the nearest face of `aabb`, if `p` is within
/// `tolerance` of the box.
pub fn distance_to_faces(aabb: &Aabb, p: Point3D, tolerance: f32) -> Option<f32> {
    let (min, max) = (aabb.min, aabb.max);
    let inside = p.x >= min.x - tolerance
        && p.x <= max.x + tolerance
        && p.y >= min.y - tolerance
        && p.y <= max.y + tolerance
        && p.z >= min.z - tolerance
        && p.z <= max.z + tolerance;
    inside.then(|| {
        [
            (p.x - min.x).abs(),
            (p.x - max.x).abs(),
            (p.y - min.y).abs(),
            (p.y - max.y).abs(),
            (p.z - min.z).abs(),
            (p.z - max.z).abs(),
        ]
        .into_iter()
        .fold(f32::INFINITY, f32::min)
    })
}
