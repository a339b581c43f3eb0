//! Default value functions for serde deserialization.

use crate::classify::{ZBand, ZBands};
use crate::geometry::{FOCAL_LENGTH_PX, FRAME_HEIGHT, FRAME_WIDTH};

pub fn frame_width() -> usize {
    FRAME_WIDTH
}

pub fn frame_height() -> usize {
    FRAME_HEIGHT
}

pub fn focal_length_px() -> f32 {
    FOCAL_LENGTH_PX
}

pub fn max_reliable_depth_mm() -> u16 {
    2500
}

pub fn camera_y() -> f32 {
    -3.0
}

pub fn camera_yaw() -> f32 {
    std::f32::consts::FRAC_PI_2
}

pub fn extent_m() -> f32 {
    6.0
}

pub fn cells() -> usize {
    1000
}

pub fn bands() -> Vec<ZBand> {
    ZBands::default().iter().cloned().collect()
}
