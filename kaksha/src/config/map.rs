//! Flat-map configuration section.

use serde::{Deserialize, Serialize};

use crate::flatmap::{FlatMap, MapExtent};

use super::defaults;

/// Flat-map settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSection {
    /// Physical width covered (m)
    #[serde(default = "defaults::extent_m")]
    pub extent_width_m: f32,

    /// Physical height covered (m)
    #[serde(default = "defaults::extent_m")]
    pub extent_height_m: f32,

    /// Raster columns
    #[serde(default = "defaults::cells")]
    pub columns: usize,

    /// Raster rows
    #[serde(default = "defaults::cells")]
    pub rows: usize,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            extent_width_m: 6.0,
            extent_height_m: 6.0,
            columns: 1000,
            rows: 1000,
        }
    }
}

impl MapSection {
    /// Physical extent
    pub fn extent(&self) -> MapExtent {
        MapExtent::new(self.extent_width_m, self.extent_height_m)
    }

    /// Create an empty FlatMap
    pub fn to_flat_map(&self) -> FlatMap {
        FlatMap::new(self.extent(), self.columns, self.rows)
    }
}
