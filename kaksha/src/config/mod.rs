//! Configuration loading.
//!
//! Loads all configuration from a single YAML file with defaults for every
//! field, so an empty file is a valid configuration.
//!
//! ```rust,ignore
//! use kaksha::config::KakshaConfig;
//!
//! // configs/config.yaml if present, else defaults
//! let config = KakshaConfig::load_default()?;
//!
//! let geometry = config.geometry_model();
//! let classifier = config.classifier()?;
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! sensor:
//!   focal_length_px: 364.4
//!   max_reliable_depth_mm: 2500
//! camera:
//!   x: 0.0
//!   y: -3.0
//!   z: 0.0
//!   yaw: 1.5707964
//! map:
//!   extent_width_m: 6.0
//!   columns: 1000
//! bands:
//!   - { name: mid, z_min: -0.5, z_max: 0.5, color: 4294901760 }
//! scheduler:
//!   target_fps: 15.0
//! ```

mod defaults;
mod error;
mod kaksha;
mod map;
mod sensor;

pub use error::{ConfigError, ConfigLoadError};
pub use kaksha::KakshaConfig;

pub use map::MapSection;
pub use sensor::{CameraSection, SensorSection};
