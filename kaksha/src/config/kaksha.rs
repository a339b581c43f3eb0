//! Main KakshaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{FrameClassifier, ZBand, ZBands};
use crate::flatmap::FlatMap;
use crate::geometry::GeometryModel;
use crate::index::{IndexConfig, PointIndex};
use crate::scheduler::{FrameScheduler, SchedulerConfig};

use super::defaults;
use super::error::{ConfigError, ConfigLoadError};
use super::map::MapSection;
use super::sensor::{CameraSection, SensorSection};

/// Full configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KakshaConfig {
    /// Depth sensor settings
    #[serde(default)]
    pub sensor: SensorSection,

    /// Initial camera pose
    #[serde(default)]
    pub camera: CameraSection,

    /// Flat-map settings
    #[serde(default)]
    pub map: MapSection,

    /// Height bands, in lookup order
    #[serde(default = "defaults::bands")]
    pub bands: Vec<ZBand>,

    /// Frame-rate gate
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Spatial index
    #[serde(default)]
    pub index: IndexConfig,
}

impl Default for KakshaConfig {
    fn default() -> Self {
        Self {
            sensor: SensorSection::default(),
            camera: CameraSection::default(),
            map: MapSection::default(),
            bands: defaults::bands(),
            scheduler: SchedulerConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl KakshaConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        let config = Self::from_yaml(&contents)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Check every value the pipeline depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sensor = &self.sensor;
        let max_side = u16::MAX as usize;
        if sensor.frame_width == 0
            || sensor.frame_height == 0
            || sensor.frame_width > max_side
            || sensor.frame_height > max_side
        {
            return Err(ConfigError::FrameSize {
                width: sensor.frame_width,
                height: sensor.frame_height,
            });
        }
        if !(sensor.focal_length_px > 0.0 && sensor.focal_length_px.is_finite()) {
            return Err(ConfigError::FocalLength(sensor.focal_length_px));
        }
        if let Some(min) = sensor.min_reliable_depth_mm
            && min > sensor.max_reliable_depth_mm
        {
            return Err(ConfigError::DepthRange {
                min,
                max: sensor.max_reliable_depth_mm,
            });
        }

        let camera = &self.camera;
        if ![camera.x, camera.y, camera.z, camera.yaw]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::CameraPose);
        }

        let map = &self.map;
        let positive = |v: f32| v > 0.0 && v.is_finite();
        if !positive(map.extent_width_m) || !positive(map.extent_height_m) {
            return Err(ConfigError::MapExtent {
                width: map.extent_width_m,
                height: map.extent_height_m,
            });
        }
        if map.columns == 0 || map.rows == 0 {
            return Err(ConfigError::MapResolution {
                columns: map.columns,
                rows: map.rows,
            });
        }

        if !positive(self.scheduler.target_fps) {
            return Err(ConfigError::FrameRate(self.scheduler.target_fps));
        }

        self.zbands()?;
        Ok(())
    }

    /// Create the GeometryModel at the configured initial pose
    pub fn geometry_model(&self) -> GeometryModel {
        GeometryModel::new(self.sensor.to_intrinsics(), self.camera.to_pose())
    }

    /// Validated height bands
    pub fn zbands(&self) -> Result<ZBands, ConfigError> {
        Ok(ZBands::new(self.bands.clone())?)
    }

    /// Create the FrameClassifier
    pub fn classifier(&self) -> Result<FrameClassifier, ConfigError> {
        Ok(FrameClassifier::new(
            self.zbands()?,
            self.sensor.max_reliable_depth_mm,
        ))
    }

    /// Create an empty FlatMap
    pub fn flat_map(&self) -> FlatMap {
        self.map.to_flat_map()
    }

    /// Create the FrameScheduler
    pub fn scheduler(&self) -> FrameScheduler {
        FrameScheduler::new(self.scheduler.clone())
    }

    /// Create an empty PointIndex
    pub fn point_index(&self) -> PointIndex {
        PointIndex::new(&self.index)
    }
}
