//! Point, pose and sample types.
//!
//! All coordinates are in the room frame, in meters:
//! - X: right when looking along +Y from above
//! - Y: away from the map's bottom edge
//! - Z: up (height)

use serde::{Deserialize, Serialize};

/// A 2D point in meters (a [`Point3D`] with its height dropped).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// A 3D point in meters, room frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Height in meters
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Project onto the floor plane.
    #[inline]
    pub fn to_2d(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl From<Point3D> for Point2D {
    fn from(p: Point3D) -> Self {
        p.to_2d()
    }
}

/// Camera pose in the room frame.
///
/// Position in meters and yaw in radians. Yaw is the heading of the
/// optical axis measured from the room's -X axis towards +Y, so the
/// default yaw of π/2 looks straight along +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position in meters
    pub position: Point3D,
    /// Heading in radians, normalized to [-π, π]
    pub yaw: f32,
}

impl CameraPose {
    /// Create a new pose with yaw normalized to [-π, π].
    #[inline]
    pub fn new(position: Point3D, yaw: f32) -> Self {
        Self {
            position,
            yaw: crate::core::math::normalize_angle(yaw),
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Point3D::default(), std::f32::consts::FRAC_PI_2)
    }
}

/// One pixel of a depth frame.
///
/// Only lives for the duration of processing that pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthSample {
    /// Pixel column
    pub column: u16,
    /// Pixel row
    pub row: u16,
    /// Raw depth in sensor units (millimeters)
    pub depth: u16,
}

impl DepthSample {
    /// Create a new sample.
    #[inline]
    pub fn new(column: u16, row: u16, depth: u16) -> Self {
        Self { column, row, depth }
    }
}
