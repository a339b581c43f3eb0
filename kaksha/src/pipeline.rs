//! Frame pipeline: rate gate → classifier → flat map and spatial index.
//!
//! [`DepthMapper::process_frame`] is called by the frame source once per
//! completed sensor frame. Frames are processed to completion one at a
//! time; a frame that arrives too soon after the last accepted one is
//! dropped before any work is done.
//!
//! The flat map's write lock is held from the clear until the last cell
//! is written, and the map's generation is bumped before the lock is
//! released, so readers of [`SharedFlatMap`] only ever see whole frames.

use crate::classify::{ClassifiedPoint, FrameClassifier, FrameStats, PointSink};
use crate::config::{ConfigError, KakshaConfig};
use crate::core::{CameraPose, DepthFrame, FrameError, Point3D, SensorStatus};
use crate::flatmap::{FlatMap, SharedFlatMap};
use crate::geometry::GeometryModel;
use crate::index::PointIndex;
use crate::scheduler::FrameScheduler;

/// What happened to an offered frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Arrived faster than the target rate; nothing was touched.
    Dropped,
    /// Malformed; nothing was touched.
    Skipped(FrameError),
    /// Classified and rasterized.
    Processed(FrameStats),
}

impl FrameOutcome {
    /// True if the frame produced output.
    pub fn is_processed(&self) -> bool {
        matches!(self, FrameOutcome::Processed(_))
    }

    /// Stats of a processed frame.
    pub fn stats(&self) -> Option<&FrameStats> {
        match self {
            FrameOutcome::Processed(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Plots points onto the locked map and optionally keeps the cloud.
struct RasterSink<'a> {
    map: &'a mut FlatMap,
    cloud: Option<Vec<Point3D>>,
    written: usize,
    dropped: usize,
}

impl PointSink for RasterSink<'_> {
    fn emit(&mut self, point: &ClassifiedPoint) {
        if self.map.plot(point.point.to_2d(), point.color) {
            self.written += 1;
        } else {
            self.dropped += 1;
        }
        if let Some(cloud) = self.cloud.as_mut() {
            cloud.push(point.point);
        }
    }
}

/// Depth frames in, flat map and point index out.
#[derive(Debug)]
pub struct DepthMapper {
    geometry: GeometryModel,
    classifier: FrameClassifier,
    scheduler: FrameScheduler,
    flat_map: SharedFlatMap,
    index: PointIndex,
    /// One display byte per pixel of the last processed frame
    intensity: Vec<u8>,
    /// Replaces the per-frame minimum reliable depth when set
    min_depth_override: Option<u16>,
    status: SensorStatus,
    totals: FrameStats,
    skipped_count: u64,
}

impl DepthMapper {
    /// Build a pipeline from validated components.
    pub fn new(
        geometry: GeometryModel,
        classifier: FrameClassifier,
        scheduler: FrameScheduler,
        flat_map: FlatMap,
        index: PointIndex,
    ) -> Self {
        let pixels = geometry.intrinsics().pixel_count();
        let band_count = classifier.bands().len();
        Self {
            geometry,
            classifier,
            scheduler,
            flat_map: SharedFlatMap::new(flat_map),
            index,
            intensity: vec![0; pixels],
            min_depth_override: None,
            status: SensorStatus::default(),
            totals: FrameStats::new(band_count),
            skipped_count: 0,
        }
    }

    /// Build a pipeline from configuration.
    pub fn from_config(config: &KakshaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut mapper = Self::new(
            config.geometry_model(),
            config.classifier()?,
            config.scheduler(),
            config.flat_map(),
            config.point_index(),
        );
        mapper.min_depth_override = config.sensor.min_reliable_depth_mm;
        Ok(mapper)
    }

    /// Offer one frame from the source.
    pub fn process_frame(&mut self, frame: &DepthFrame) -> FrameOutcome {
        if let Err(e) = FrameClassifier::check(&self.geometry, frame, self.intensity.len()) {
            log::debug!("Skipping frame at {}us: {}", frame.timestamp_us, e);
            self.skipped_count += 1;
            return FrameOutcome::Skipped(e);
        }

        if !self.scheduler.offer(frame.timestamp_us) {
            return FrameOutcome::Dropped;
        }

        let min_depth = self.min_depth_override.unwrap_or(frame.min_reliable_depth);

        let mut map = self.flat_map.write();
        map.clear();
        let mut sink = RasterSink {
            map: &mut map,
            cloud: self.index.wants_points().then(Vec::new),
            written: 0,
            dropped: 0,
        };

        let result = self.classifier.classify(
            &self.geometry,
            frame,
            min_depth,
            &mut self.intensity,
            &mut sink,
        );
        let RasterSink {
            cloud,
            written,
            dropped,
            ..
        } = sink;

        let mut stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                log::debug!("Skipping frame at {}us: {}", frame.timestamp_us, e);
                self.skipped_count += 1;
                return FrameOutcome::Skipped(e);
            }
        };
        stats.cells_written = written;
        stats.cells_dropped = dropped;
        map.mark_updated(frame.timestamp_us);
        drop(map);

        if let Some(cloud) = cloud {
            self.index.build(cloud);
        }

        log::trace!(
            "Frame at {}us: {} points, {} cells, {} off-map",
            frame.timestamp_us,
            stats.points(),
            written,
            dropped
        );
        self.totals.merge(&stats);
        FrameOutcome::Processed(stats)
    }

    /// Replace the camera pose. Takes effect from the next frame.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.geometry.set_pose(pose);
    }

    /// Current camera pose.
    pub fn pose(&self) -> CameraPose {
        self.geometry.pose()
    }

    /// Geometry model in use.
    pub fn geometry(&self) -> &GeometryModel {
        &self.geometry
    }

    /// Record the source's latest sensor status.
    pub fn set_sensor_status(&mut self, status: SensorStatus) {
        if status != self.status {
            log::info!("Sensor status: {}", status);
            self.status = status;
        }
    }

    /// Latest sensor status.
    pub fn sensor_status(&self) -> SensorStatus {
        self.status
    }

    /// Display intensity of the last processed frame, row-major.
    pub fn intensity(&self) -> &[u8] {
        &self.intensity
    }

    /// Handle to the flat map for readers on other threads.
    pub fn flat_map(&self) -> SharedFlatMap {
        self.flat_map.clone()
    }

    /// Spatial index.
    pub fn index(&self) -> &PointIndex {
        &self.index
    }

    /// Discard the spatial index; the next frame with points rebuilds it.
    pub fn reset_index(&mut self) {
        self.index.reset();
    }

    /// Frame-rate gate and its counters.
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Stats merged over every processed frame.
    pub fn totals(&self) -> &FrameStats {
        &self.totals
    }

    /// Number of malformed frames skipped.
    pub fn skipped_count(&self) -> u64 {
        self.skipped_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ZBand, ZBands};
    use crate::core::Color;
    use crate::flatmap::MapExtent;
    use crate::geometry::SensorIntrinsics;
    use crate::index::IndexConfig;
    use crate::scheduler::SchedulerConfig;

    fn mapper() -> DepthMapper {
        let bands = ZBands::new(vec![
            ZBand::new("down", -1.0, 0.0, Color::BLUE),
            ZBand::new("up", 0.0, 1.0, Color::GREEN),
        ])
        .unwrap();
        DepthMapper::new(
            GeometryModel::new(
                SensorIntrinsics::new(4, 4, 364.4),
                CameraPose::new(Point3D::default(), std::f32::consts::FRAC_PI_2),
            ),
            FrameClassifier::new(bands, 4000),
            FrameScheduler::new(SchedulerConfig::default()),
            FlatMap::new(MapExtent::new(6.0, 6.0), 1000, 1000),
            PointIndex::new(&IndexConfig::default()),
        )
    }

    #[test]
    fn test_processed_frame_marks_map() {
        let mut mapper = mapper();
        let outcome = mapper.process_frame(&DepthFrame::uniform(4, 4, 1000, 500));
        let stats = outcome.stats().unwrap();
        assert_eq!(stats.points(), 16);
        assert_eq!(stats.cells_written, 16);
        assert_eq!(mapper.flat_map().generation(), 1);
        assert!(mapper.index().is_built());
    }

    #[test]
    fn test_malformed_frame_untouched() {
        let mut mapper = mapper();
        let frame = DepthFrame::new(4, 4, vec![1000; 15], 500);
        assert!(matches!(
            mapper.process_frame(&frame),
            FrameOutcome::Skipped(FrameError::SizeMismatch { .. })
        ));
        assert_eq!(mapper.flat_map().generation(), 0);
        assert_eq!(mapper.scheduler().total_count(), 0);
        assert_eq!(mapper.skipped_count(), 1);
    }

    #[test]
    fn test_intensity_mismatch_leaves_map_intact() {
        let mut mapper = mapper();
        assert!(mapper.process_frame(&DepthFrame::uniform(4, 4, 1000, 500)).is_processed());
        let painted = mapper.flat_map().read().painted_count();
        assert!(painted > 0);

        mapper.intensity.truncate(8);
        let mut frame = DepthFrame::uniform(4, 4, 1000, 500);
        frame.timestamp_us = 1_000_000;
        assert!(matches!(
            mapper.process_frame(&frame),
            FrameOutcome::Skipped(FrameError::SizeMismatch { expected: 16, actual: 8 })
        ));
        let map = mapper.flat_map();
        let map = map.read();
        assert_eq!(map.generation(), 1);
        assert_eq!(map.painted_count(), painted);
        assert_eq!(mapper.scheduler().accepted_count(), 1);
    }

    #[test]
    fn test_sensor_status() {
        let mut mapper = mapper();
        assert_eq!(mapper.sensor_status(), SensorStatus::NoSensor);
        mapper.set_sensor_status(SensorStatus::Running);
        assert_eq!(mapper.sensor_status().status_text(), "Running");
    }
}
