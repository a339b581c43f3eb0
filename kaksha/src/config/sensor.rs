//! Sensor and camera configuration sections.

use serde::{Deserialize, Serialize};

use crate::core::{CameraPose, Point3D};
use crate::geometry::SensorIntrinsics;

use super::defaults;

/// Depth sensor settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorSection {
    /// Frame width (pixels)
    #[serde(default = "defaults::frame_width")]
    pub frame_width: usize,

    /// Frame height (pixels)
    #[serde(default = "defaults::frame_height")]
    pub frame_height: usize,

    /// Focal length shared by both axes (pixels)
    #[serde(default = "defaults::focal_length_px")]
    pub focal_length_px: f32,

    /// Upper reliable depth (mm)
    #[serde(default = "defaults::max_reliable_depth_mm")]
    pub max_reliable_depth_mm: u16,

    /// Lower reliable depth (mm). When unset, each frame's reported
    /// minimum is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_reliable_depth_mm: Option<u16>,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            frame_width: 512,
            frame_height: 424,
            focal_length_px: 364.4,
            max_reliable_depth_mm: 2500,
            min_reliable_depth_mm: None,
        }
    }
}

impl SensorSection {
    /// Convert to SensorIntrinsics
    pub fn to_intrinsics(&self) -> SensorIntrinsics {
        SensorIntrinsics::new(self.frame_width, self.frame_height, self.focal_length_px)
    }
}

/// Initial camera pose in the room frame
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraSection {
    /// X position (m)
    #[serde(default)]
    pub x: f32,

    /// Y position (m)
    #[serde(default = "defaults::camera_y")]
    pub y: f32,

    /// Height (m)
    #[serde(default)]
    pub z: f32,

    /// Heading (rad)
    #[serde(default = "defaults::camera_yaw")]
    pub yaw: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: -3.0,
            z: 0.0,
            yaw: std::f32::consts::FRAC_PI_2,
        }
    }
}

impl CameraSection {
    /// Convert to CameraPose
    pub fn to_pose(&self) -> CameraPose {
        CameraPose::new(Point3D::new(self.x, self.y, self.z), self.yaw)
    }
}
