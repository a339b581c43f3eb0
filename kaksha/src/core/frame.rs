//! Raw depth frames as delivered by a depth sensor.

use thiserror::Error;

/// Reasons a frame is skipped before classification.
///
/// A malformed frame produces no output for that tick; it is never fatal
/// and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Width or height is zero
    #[error("frame has empty dimensions {width}x{height}")]
    EmptyDimensions {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },

    /// Pixel coordinates would not fit a [`DepthSample`](crate::core::DepthSample)
    #[error("frame dimensions {width}x{height} exceed the 65536-pixel axis limit")]
    DimensionsTooLarge {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },

    /// Buffer length does not match width × height
    #[error("buffer holds {actual} samples, expected {expected}")]
    SizeMismatch {
        /// width × height
        expected: usize,
        /// Buffer length
        actual: usize,
    },

    /// Frame dimensions differ from the configured sensor geometry
    #[error("frame is {actual:?}, sensor is configured for {expected:?}")]
    GeometryMismatch {
        /// Configured (width, height)
        expected: (usize, usize),
        /// Frame (width, height)
        actual: (usize, usize),
    },
}

/// Largest frame width or height; pixel coordinates are `u16`.
pub const MAX_AXIS_PIXELS: usize = u16::MAX as usize + 1;

/// One frame of depth readings.
///
/// Row-major, one depth value per pixel in sensor units (millimeters).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
    /// Row-major depth values, `width * height` entries
    pub data: Vec<u16>,
    /// Minimum reliable depth reported by the sensor for this frame (mm)
    pub min_reliable_depth: u16,
    /// Arrival timestamp in microseconds
    pub timestamp_us: u64,
}

impl DepthFrame {
    /// Create a new frame.
    pub fn new(width: usize, height: usize, data: Vec<u16>, min_reliable_depth: u16) -> Self {
        Self {
            width,
            height,
            data,
            min_reliable_depth,
            timestamp_us: 0,
        }
    }

    /// Create a frame where every pixel has the same depth.
    pub fn uniform(width: usize, height: usize, depth: u16, min_reliable_depth: u16) -> Self {
        Self::new(width, height, vec![depth; width * height], min_reliable_depth)
    }

    /// Set the arrival timestamp.
    pub fn with_timestamp(mut self, timestamp_us: u64) -> Self {
        self.timestamp_us = timestamp_us;
        self
    }

    /// Number of pixels declared by the frame dimensions.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Depth at (column, row), if inside the frame.
    #[inline]
    pub fn depth_at(&self, column: usize, row: usize) -> Option<u16> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + column).copied()
    }

    /// Check the frame against the configured sensor geometry.
    pub fn validate(&self, expected_width: usize, expected_height: usize) -> Result<(), FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::EmptyDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.width > MAX_AXIS_PIXELS || self.height > MAX_AXIS_PIXELS {
            return Err(FrameError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        if self.data.len() != self.pixel_count() {
            return Err(FrameError::SizeMismatch {
                expected: self.pixel_count(),
                actual: self.data.len(),
            });
        }

        if (self.width, self.height) != (expected_width, expected_height) {
            return Err(FrameError::GeometryMismatch {
                expected: (expected_width, expected_height),
                actual: (self.width, self.height),
            });
        }

        Ok(())
    }
}

/// Availability of the depth sensor, as reported by the frame source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorStatus {
    /// Sensor open and delivering frames
    Running,
    /// No sensor attached
    #[default]
    NoSensor,
    /// Sensor attached but paused, closed or unplugged
    NotAvailable,
}

impl SensorStatus {
    /// Human-readable status line.
    pub fn status_text(&self) -> &'static str {
        match self {
            SensorStatus::Running => "Running",
            SensorStatus::NoSensor => "No ready depth sensor found",
            SensorStatus::NotAvailable => "Depth sensor not available",
        }
    }
}

impl std::fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_text())
    }
}
