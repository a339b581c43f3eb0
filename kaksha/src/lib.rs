//! # Kaksha
//!
//! Depth-sensor frames to a room-frame point cloud, a top-down band map and
//! a k-d tree index.
//!
//! ## Overview
//!
//! Each depth frame flows through:
//!
//! - **Scheduler**: a minimum-interval gate that drops frames arriving
//!   faster than the target rate
//! - **Classifier**: per-pixel display intensity, reliable-depth filter,
//!   height band lookup, and inverse pinhole projection
//! - **Flat map**: a fixed raster over a fixed physical extent, redrawn
//!   under a write lock for every accepted frame
//! - **Spatial index**: median-split 2D and 3D k-d trees built once from
//!   the first frame with band-matched points
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kaksha::{DepthMapper, KakshaConfig};
//!
//! let config = KakshaConfig::load_default()?;
//! let mut mapper = DepthMapper::from_config(&config)?;
//!
//! // Called by the frame source for every completed frame
//! let outcome = mapper.process_frame(&frame);
//!
//! let map = mapper.flat_map();
//! println!("{} cells painted", map.read().painted_count());
//! ```
//!
//! ## Coordinate System
//!
//! Room frame, meters:
//! - X, Y: floor plane; the flat map's top-left corner is `(-W/2, +H/2)`
//! - Z: up
//! - Yaw: camera heading, radians; π/2 looks along +Y

#![warn(missing_docs)]

// Core types
pub mod core;

// Pinhole inverse projection
pub mod geometry;

// Per-frame classification
pub mod classify;

// Top-down raster
pub mod flatmap;

// k-d trees
pub mod index;

// Frame-rate gate
pub mod scheduler;

// Unified configuration
pub mod config;

// Scheduler → classifier → map/index
pub mod pipeline;

// Synthetic depth source
pub mod sim;

// PNG export
pub mod io;

// Re-export commonly used types
pub use core::{
    CameraPose, Color, DepthFrame, DepthSample, FrameError, Point2D, Point3D, SensorStatus,
};

pub use geometry::{GeometryModel, HeightRange, Projection, SensorIntrinsics};

pub use classify::{ClassifiedPoint, FrameClassifier, FrameStats, PointSink, ZBand, ZBands};

pub use flatmap::{FlatMap, MapExtent, SharedFlatMap};

pub use index::{KdTree, KdTree2D, KdTree3D, PointIndex};

pub use scheduler::{FrameScheduler, SchedulerConfig};

pub use config::{ConfigError, ConfigLoadError, KakshaConfig};

pub use pipeline::{DepthMapper, FrameOutcome};

pub use sim::{SimulationConfig, SyntheticRoom};
