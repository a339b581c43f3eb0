//! Synthetic depth source.
//!
//! Renders depth frames of a box room by casting one ray per pixel through
//! the same pinhole model the [`GeometryModel`](crate::geometry::GeometryModel)
//! inverts. With the camera at position `P` and yaw `θ`, pixel offsets
//! `(sx, sy)` from the frame center and focal length `f`, the ray is
//!
//! ```text
//! dir = ( -(cos θ + sx · sin θ / f),  sin θ - sx · cos θ / f,  -sy / f )
//! point(d) = P + d · dir
//! ```
//!
//! so the ray parameter at the first surface hit is exactly the depth (m)
//! the sensor would report. Range noise and dropouts are optional.
//!
//! Stands in for a live sensor in the CLI, tests and benchmarks.

mod noise;
mod room;

pub use noise::NoiseGenerator;
pub use room::{Aabb, RoomConfig};

use serde::{Deserialize, Serialize};

use crate::core::{CameraPose, DepthFrame, Point3D};
use crate::geometry::SensorIntrinsics;

/// Synthetic sensor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Frame rate of the simulated sensor (Hz)
    #[serde(default = "default_sensor_hz")]
    pub sensor_hz: f32,

    /// Minimum reliable depth reported with every frame (mm)
    #[serde(default = "default_min_reliable_depth_mm")]
    pub min_reliable_depth_mm: u16,

    /// Surfaces further than this read as 0 (mm)
    #[serde(default = "default_max_range_mm")]
    pub max_range_mm: u16,

    /// Range noise standard deviation (mm)
    #[serde(default)]
    pub range_stddev_mm: f32,

    /// Probability that a pixel reads 0
    #[serde(default)]
    pub dropout_rate: f32,

    /// Noise seed (0 = entropy)
    #[serde(default)]
    pub seed: u64,

    /// Room layout
    #[serde(default)]
    pub room: RoomConfig,
}

fn default_sensor_hz() -> f32 {
    30.0
}

fn default_min_reliable_depth_mm() -> u16 {
    500
}

fn default_max_range_mm() -> u16 {
    8000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sensor_hz: 30.0,
            min_reliable_depth_mm: 500,
            max_range_mm: 8000,
            range_stddev_mm: 0.0,
            dropout_rate: 0.0,
            seed: 0,
            room: RoomConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Add sensor-like noise: a few millimeters of range jitter and rare dropouts.
    pub fn with_noise(mut self, seed: u64) -> Self {
        self.range_stddev_mm = 4.0;
        self.dropout_rate = 0.01;
        self.seed = seed;
        self
    }
}

/// Depth frame generator for a box room.
#[derive(Debug, Clone)]
pub struct SyntheticRoom {
    config: SimulationConfig,
    intrinsics: SensorIntrinsics,
    pose: CameraPose,
    noise: NoiseGenerator,
    /// Noise-free depth per pixel (mm), refreshed on pose change
    clean: Vec<u16>,
    frame_interval_us: u64,
    next_timestamp_us: u64,
    frames_generated: u64,
}

impl SyntheticRoom {
    /// Create a generator for the given sensor at `pose`.
    pub fn new(config: SimulationConfig, intrinsics: SensorIntrinsics, pose: CameraPose) -> Self {
        let frame_interval_us = if config.sensor_hz > 0.0 {
            (1_000_000.0 / config.sensor_hz as f64).round() as u64
        } else {
            0
        };
        let noise = NoiseGenerator::new(config.seed);
        let mut room = Self {
            config,
            intrinsics,
            pose,
            noise,
            clean: Vec::new(),
            frame_interval_us,
            next_timestamp_us: 0,
            frames_generated: 0,
        };
        room.render_clean();
        room
    }

    /// Simulation settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current camera pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Move the camera.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.render_clean();
    }

    /// Number of frames produced so far.
    pub fn frames_generated(&self) -> u64 {
        self.frames_generated
    }

    /// Time between frames (microseconds).
    pub fn frame_interval_us(&self) -> u64 {
        self.frame_interval_us
    }

    /// Ray direction for a pixel, scaled so the hit parameter is depth (m).
    pub fn ray_direction(&self, column: usize, row: usize) -> Point3D {
        let f = self.intrinsics.focal_length_px;
        let sx = column as f32 - self.intrinsics.width as f32 / 2.0;
        let sy = row as f32 - self.intrinsics.height as f32 / 2.0;
        let (sin, cos) = self.pose.yaw.sin_cos();
        Point3D::new(
            -(cos + sx * sin / f),
            sin - sx * cos / f,
            -sy / f,
        )
    }

    fn render_clean(&mut self) {
        let (width, height) = (self.intrinsics.width, self.intrinsics.height);
        let max_m = self.config.max_range_mm as f32 / 1000.0;
        let origin = self.pose.position;

        let mut clean = Vec::with_capacity(width * height);
        for row in 0..height {
            for column in 0..width {
                let dir = self.ray_direction(column, row);
                let depth = match self.config.room.ray_cast(origin, dir) {
                    Some(t) if t <= max_m => (t * 1000.0).round() as u16,
                    _ => 0,
                };
                clean.push(depth);
            }
        }
        log::debug!(
            "Rendered {}x{} synthetic depth view, {} pixels with a surface in range",
            width,
            height,
            clean.iter().filter(|&&d| d > 0).count()
        );
        self.clean = clean;
    }

    /// Produce the next frame, timestamped at the sensor rate.
    pub fn next_frame(&mut self) -> DepthFrame {
        let stddev = self.config.range_stddev_mm;
        let dropout = self.config.dropout_rate;
        let max_range = self.config.max_range_mm as f32;

        let data = if stddev == 0.0 && dropout <= 0.0 {
            self.clean.clone()
        } else {
            self.clean
                .iter()
                .map(|&d| {
                    if d == 0 || self.noise.chance(dropout) {
                        return 0;
                    }
                    let noisy = d as f32 + self.noise.gaussian(stddev);
                    noisy.round().clamp(1.0, max_range) as u16
                })
                .collect()
        };

        let frame = DepthFrame::new(
            self.intrinsics.width,
            self.intrinsics.height,
            data,
            self.config.min_reliable_depth_mm,
        )
        .with_timestamp(self.next_timestamp_us);

        self.next_timestamp_us += self.frame_interval_us;
        self.frames_generated += 1;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn room() -> SyntheticRoom {
        SyntheticRoom::new(
            SimulationConfig {
                room: RoomConfig {
                    obstacles: Vec::new(),
                    ..Default::default()
                },
                ..Default::default()
            },
            SensorIntrinsics::default(),
            CameraPose::new(Point3D::new(0.0, -3.0, 0.0), FRAC_PI_2),
        )
    }

    #[test]
    fn test_center_pixel_hits_far_wall() {
        let mut room = room();
        let frame = room.next_frame();
        assert_eq!(frame.depth_at(256, 212), Some(6000));
    }

    #[test]
    fn test_center_ray_direction() {
        let dir = room().ray_direction(256, 212);
        assert_relative_eq!(dir.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(dir.y, 1.0);
        assert_relative_eq!(dir.z, 0.0);
    }

    #[test]
    fn test_timestamps_follow_sensor_rate() {
        let mut room = room();
        let a = room.next_frame();
        let b = room.next_frame();
        assert_eq!(a.timestamp_us, 0);
        assert_eq!(b.timestamp_us, 33_333);
        assert_eq!(room.frames_generated(), 2);
    }

    #[test]
    fn test_out_of_range_reads_zero() {
        let mut room = SyntheticRoom::new(
            SimulationConfig {
                max_range_mm: 1000,
                ..Default::default()
            },
            SensorIntrinsics::default(),
            CameraPose::new(Point3D::new(0.0, -3.0, 0.0), FRAC_PI_2),
        );
        assert_eq!(room.next_frame().depth_at(256, 212), Some(0));
    }

    #[test]
    fn test_noise_is_seeded() {
        let config = SimulationConfig::default().with_noise(9);
        let pose = CameraPose::new(Point3D::new(0.0, -3.0, 0.0), FRAC_PI_2);
        let mut a = SyntheticRoom::new(config.clone(), SensorIntrinsics::default(), pose);
        let mut b = SyntheticRoom::new(config, SensorIntrinsics::default(), pose);
        assert_eq!(a.next_frame().data, b.next_frame().data);
    }

    #[test]
    fn test_set_pose_rerenders() {
        let mut room = room();
        room.set_pose(CameraPose::new(Point3D::new(0.0, 0.0, 0.0), FRAC_PI_2));
        assert_eq!(room.next_frame().depth_at(256, 212), Some(3000));
    }
}
