//! Build-once spatial index over the first qualifying frame.

use serde::{Deserialize, Serialize};

use super::{KdTree2D, KdTree3D};
use crate::core::{Point2D, Point3D};

/// Spatial index settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Build the index from the first frame with band-matched points.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

/// 2D and 3D trees over one frame's band-matched points.
///
/// Populated once; later frames are ignored until [`PointIndex::reset`].
#[derive(Debug, Clone, Default)]
pub struct PointIndex {
    enabled: bool,
    map: Option<KdTree2D>,
    cloud: Option<KdTree3D>,
}

impl PointIndex {
    /// Create an empty index.
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            enabled: config.enabled,
            map: None,
            cloud: None,
        }
    }

    /// True if indexing is turned on.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True once both trees exist.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.cloud.is_some()
    }

    /// True while the next qualifying frame should be collected.
    #[inline]
    pub fn wants_points(&self) -> bool {
        self.enabled && !self.is_built()
    }

    /// Build both trees from a frame's cloud.
    ///
    /// Returns false (and keeps the current state) if the index is disabled,
    /// already built, or `cloud` is empty.
    pub fn build(&mut self, cloud: Vec<Point3D>) -> bool {
        if !self.wants_points() || cloud.is_empty() {
            return false;
        }

        let projections: Vec<Point2D> = cloud.iter().map(Point3D::to_2d).collect();
        let map = KdTree2D::build(projections);
        let cloud = KdTree3D::build(cloud);
        log::info!(
            "Spatial index built: {} points, depth {} (2D) / {} (3D)",
            cloud.len(),
            map.depth(),
            cloud.depth()
        );

        self.map = Some(map);
        self.cloud = Some(cloud);
        true
    }

    /// 2D tree over flat-map projections.
    #[inline]
    pub fn map_tree(&self) -> Option<&KdTree2D> {
        self.map.as_ref()
    }

    /// 3D tree over the room-frame cloud.
    #[inline]
    pub fn cloud_tree(&self) -> Option<&KdTree3D> {
        self.cloud.as_ref()
    }

    /// Discard both trees so the next qualifying frame rebuilds them.
    pub fn reset(&mut self) {
        if self.is_built() {
            log::debug!("Spatial index discarded");
        }
        self.map = None;
        self.cloud = None;
    }
}
