//! Core foundation layer.
//!
//! The bottom layer of the crate with no internal dependencies.
//!
//! # Contents
//!
//! - [`types`]: Points, camera pose, depth samples
//! - [`color`]: Packed ARGB map colors
//! - [`frame`]: Raw depth frames and frame validation
//! - [`math`]: Angle helpers

pub mod color;
pub mod frame;
pub mod math;
pub mod types;

pub use color::Color;
pub use frame::{DepthFrame, FrameError, MAX_AXIS_PIXELS, SensorStatus};
pub use types::{CameraPose, DepthSample, Point2D, Point3D};
