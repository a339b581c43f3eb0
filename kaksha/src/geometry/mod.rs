//! Pinhole-camera geometry: depth samples to room-frame points.
//!
//! The camera sits at a configurable position with a configurable yaw and
//! no pitch or roll. A pixel's screen offset is measured from the frame
//! center; one scalar focal length serves both axes.
//!
//! ```text
//! screen_x = column - width / 2
//! screen_y = row    - height / 2
//! d        = depth_mm / 1000
//!
//! z = cam.z - screen_y / f * d
//! x = cam.x - (d * cos(yaw) + screen_x * sin(yaw) * d / f)
//! y = cam.y +  d * sin(yaw) - screen_x * cos(yaw) * d / f
//! ```
//!
//! The height is computed first so callers can reject a sample by height
//! before paying for the full transform.

mod intrinsics;

pub use intrinsics::{
    FOCAL_LENGTH_PX, FOCAL_LENGTH_X_PX, FOCAL_LENGTH_Y_PX, FRAME_HEIGHT, FRAME_WIDTH,
    SensorIntrinsics,
};

use serde::{Deserialize, Serialize};

use crate::core::math::mm_to_m;
use crate::core::{CameraPose, DepthSample, Point3D};

/// Closed-open height interval `[start, end)` in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    /// Inclusive lower bound
    pub start: f32,
    /// Exclusive upper bound
    pub end: f32,
}

impl HeightRange {
    /// Create a new range.
    #[inline]
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Whether `z` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, z: f32) -> bool {
        z >= self.start && z < self.end
    }

    /// Whether two ranges share any height.
    #[inline]
    pub fn overlaps(&self, other: &HeightRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Result of transforming one depth sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// The sample maps to this room-frame point
    Point(Point3D),
    /// The sample's height fell outside the requested range
    NotClassified,
}

impl Projection {
    /// The point, if one was produced.
    #[inline]
    pub fn point(self) -> Option<Point3D> {
        match self {
            Projection::Point(p) => Some(p),
            Projection::NotClassified => None,
        }
    }

    /// Whether a point was produced.
    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self, Projection::Point(_))
    }
}

/// Camera pose plus sensor intrinsics.
///
/// The pose is only changed through [`GeometryModel::set_pose`], which
/// needs `&mut self`; a classification pass borrows the model immutably,
/// so the pose cannot change while a frame is in flight.
#[derive(Debug, Clone)]
pub struct GeometryModel {
    intrinsics: SensorIntrinsics,
    pose: CameraPose,
    // Cached from pose.yaw
    sin_yaw: f32,
    cos_yaw: f32,
}

impl GeometryModel {
    /// Create a model for the given sensor and initial pose.
    pub fn new(intrinsics: SensorIntrinsics, pose: CameraPose) -> Self {
        let (sin_yaw, cos_yaw) = pose.yaw.sin_cos();
        Self {
            intrinsics,
            pose,
            sin_yaw,
            cos_yaw,
        }
    }

    /// Sensor intrinsics.
    #[inline]
    pub fn intrinsics(&self) -> &SensorIntrinsics {
        &self.intrinsics
    }

    /// Current camera pose.
    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Replace the camera pose.
    pub fn set_pose(&mut self, pose: CameraPose) {
        let (sin_yaw, cos_yaw) = pose.yaw.sin_cos();
        self.pose = pose;
        self.sin_yaw = sin_yaw;
        self.cos_yaw = cos_yaw;
        log::debug!(
            "Camera pose set to ({:.3}, {:.3}, {:.3}) yaw={:.3}",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.yaw
        );
    }

    /// Pixel offsets from the frame center.
    #[inline]
    fn screen_offsets(&self, sample: DepthSample) -> (f32, f32) {
        let screen_x = sample.column as f32 - self.intrinsics.width as f32 / 2.0;
        let screen_y = sample.row as f32 - self.intrinsics.height as f32 / 2.0;
        (screen_x, screen_y)
    }

    #[inline]
    fn height_from(&self, screen_y: f32, depth_m: f32) -> f32 {
        self.pose.position.z - screen_y / self.intrinsics.focal_length_px * depth_m
    }

    /// Height (z) of a sample without computing x and y.
    #[inline]
    pub fn height(&self, sample: DepthSample) -> f32 {
        let (_, screen_y) = self.screen_offsets(sample);
        self.height_from(screen_y, mm_to_m(sample.depth))
    }

    #[inline]
    fn point_from(&self, screen_x: f32, depth_m: f32, z: f32) -> Point3D {
        let rate = depth_m / self.intrinsics.focal_length_px;
        let position = self.pose.position;
        let x = position.x - (depth_m * self.cos_yaw + screen_x * self.sin_yaw * rate);
        let y = position.y + depth_m * self.sin_yaw - screen_x * self.cos_yaw * rate;
        Point3D::new(x, y, z)
    }

    /// Transform a sample to a room-frame point.
    ///
    /// With a `range`, samples whose height falls outside `[start, end)`
    /// return [`Projection::NotClassified`].
    pub fn transform(&self, sample: DepthSample, range: Option<HeightRange>) -> Projection {
        let (screen_x, screen_y) = self.screen_offsets(sample);
        let depth_m = mm_to_m(sample.depth);
        let z = self.height_from(screen_y, depth_m);

        if let Some(range) = range
            && !range.contains(z)
        {
            return Projection::NotClassified;
        }

        Projection::Point(self.point_from(screen_x, depth_m, z))
    }

    /// Transform a sample with no height filter.
    #[inline]
    pub fn to_point(&self, sample: DepthSample) -> Point3D {
        let (screen_x, screen_y) = self.screen_offsets(sample);
        let depth_m = mm_to_m(sample.depth);
        self.point_from(screen_x, depth_m, self.height_from(screen_y, depth_m))
    }
}
