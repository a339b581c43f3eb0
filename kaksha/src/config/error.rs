//! Configuration errors.

use thiserror::Error;

use crate::classify::BandError;

/// A configuration value that cannot drive the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Frame width or height is zero or exceeds the pixel index range
    #[error("sensor frame dimensions must be in 1..=65535, got {width}x{height}")]
    FrameSize {
        /// Configured width
        width: usize,
        /// Configured height
        height: usize,
    },

    /// Focal length is not a positive number
    #[error("focal length must be positive, got {0}")]
    FocalLength(f32),

    /// Minimum reliable depth override exceeds the maximum
    #[error("reliable depth range is inverted: [{min}, {max}] mm")]
    DepthRange {
        /// Minimum override (mm)
        min: u16,
        /// Maximum (mm)
        max: u16,
    },

    /// Camera position or yaw is not finite
    #[error("camera pose must be finite")]
    CameraPose,

    /// Map extent is not positive
    #[error("map extent must be positive, got {width}x{height} m")]
    MapExtent {
        /// Configured width (m)
        width: f32,
        /// Configured height (m)
        height: f32,
    },

    /// Map resolution is zero
    #[error("map resolution must be non-zero, got {columns}x{rows} cells")]
    MapResolution {
        /// Configured columns
        columns: usize,
        /// Configured rows
        rows: usize,
    },

    /// Target frame rate is not a positive number
    #[error("target frame rate must be positive, got {0}")]
    FrameRate(f32),

    /// Band definitions are invalid
    #[error(transparent)]
    Bands(#[from] BandError),
}

/// Failure to read a configuration file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parsed but invalid
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}
