//! Depth sensor intrinsics.

use serde::{Deserialize, Serialize};

/// Horizontal focal length of the reference sensor: 512 / (2 tan(70.6°/2)).
pub const FOCAL_LENGTH_X_PX: f32 = 361.6;

/// Vertical focal length of the reference sensor: 424 / (2 tan(60°/2)).
pub const FOCAL_LENGTH_Y_PX: f32 = 367.2;

/// Single focal length used for both axes: sqrt((fx² + fy²) / 2).
///
/// The ~1.5% drift between axes is accepted.
pub const FOCAL_LENGTH_PX: f32 = 364.4;

/// Reference sensor frame width in pixels.
pub const FRAME_WIDTH: usize = 512;

/// Reference sensor frame height in pixels.
pub const FRAME_HEIGHT: usize = 424;

/// Depth frame geometry and focal length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorIntrinsics {
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
    /// Focal length in pixels
    pub focal_length_px: f32,
}

impl SensorIntrinsics {
    /// Create intrinsics for an arbitrary sensor.
    pub fn new(width: usize, height: usize, focal_length_px: f32) -> Self {
        Self {
            width,
            height,
            focal_length_px,
        }
    }

    /// Focal length combined from per-axis values.
    pub fn combined_focal_length(fx: f32, fy: f32) -> f32 {
        ((fx * fx + fy * fy) / 2.0).sqrt()
    }

    /// Pixels per frame.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for SensorIntrinsics {
    fn default() -> Self {
        Self::new(FRAME_WIDTH, FRAME_HEIGHT, FOCAL_LENGTH_PX)
    }
}
