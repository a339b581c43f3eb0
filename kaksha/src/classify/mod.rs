//! Per-frame depth classification.
//!
//! Walks a depth frame in row-major order. Every pixel gets a display
//! intensity; pixels inside the reliable depth range have their height
//! computed, are matched against the configured [`ZBands`], and the
//! band-matched ones are transformed to room-frame points and handed to a
//! [`PointSink`].
//!
//! Filtering outcomes (out of range, out of band) are routine and only
//! counted in [`FrameStats`].

mod bands;
mod intensity;
mod stats;

pub use bands::{BandError, ZBand, ZBands};
pub use intensity::{MAP_DEPTH_TO_BYTE, depth_to_intensity};
pub use stats::FrameStats;

use crate::core::{Color, DepthFrame, DepthSample, FrameError, Point3D};
use crate::geometry::{GeometryModel, Projection};

/// A band-matched point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedPoint {
    /// Room-frame position
    pub point: Point3D,
    /// Index of the matched band
    pub band: usize,
    /// The band's color
    pub color: Color,
}

/// Receiver of classified points, in pixel scan order.
pub trait PointSink {
    /// Called once per band-matched pixel.
    fn emit(&mut self, point: &ClassifiedPoint);
}

impl PointSink for Vec<ClassifiedPoint> {
    fn emit(&mut self, point: &ClassifiedPoint) {
        self.push(*point);
    }
}

/// Discards every point.
impl PointSink for () {
    fn emit(&mut self, _point: &ClassifiedPoint) {}
}

/// Classifies depth frames into banded room-frame points.
#[derive(Debug, Clone)]
pub struct FrameClassifier {
    bands: ZBands,
    /// Upper reliable depth (mm), inclusive
    max_depth: u16,
}

impl FrameClassifier {
    /// Create a classifier.
    pub fn new(bands: ZBands, max_depth: u16) -> Self {
        Self { bands, max_depth }
    }

    /// Configured bands.
    #[inline]
    pub fn bands(&self) -> &ZBands {
        &self.bands
    }

    /// Upper reliable depth (mm).
    #[inline]
    pub fn max_depth(&self) -> u16 {
        self.max_depth
    }

    /// Check that `frame` can be classified with `geometry` into an
    /// intensity buffer of `intensity_len` bytes.
    pub fn check(
        geometry: &GeometryModel,
        frame: &DepthFrame,
        intensity_len: usize,
    ) -> Result<(), FrameError> {
        let intrinsics = geometry.intrinsics();
        frame.validate(intrinsics.width, intrinsics.height)?;
        if intensity_len != frame.pixel_count() {
            return Err(FrameError::SizeMismatch {
                expected: frame.pixel_count(),
                actual: intensity_len,
            });
        }
        Ok(())
    }

    /// Classify one frame.
    ///
    /// Writes one intensity byte per pixel into `intensity` and emits every
    /// band-matched point to `sink`. Pixels with depth outside
    /// `[min_depth, max_depth]` contribute only a zero intensity.
    ///
    /// Fails without touching `intensity` or `sink` when the frame does not
    /// match the model's sensor geometry or `intensity` has the wrong size.
    pub fn classify<S: PointSink + ?Sized>(
        &self,
        geometry: &GeometryModel,
        frame: &DepthFrame,
        min_depth: u16,
        intensity: &mut [u8],
        sink: &mut S,
    ) -> Result<FrameStats, FrameError> {
        Self::check(geometry, frame, intensity.len())?;

        let mut stats = FrameStats::new(self.bands.len());
        stats.frames = 1;
        stats.pixels = frame.pixel_count();

        for row in 0..frame.height {
            let row_start = row * frame.width;
            for column in 0..frame.width {
                let index = row_start + column;
                let depth = frame.data[index];

                intensity[index] = depth_to_intensity(depth, min_depth, self.max_depth);

                if depth < min_depth || depth > self.max_depth {
                    stats.out_of_range += 1;
                    continue;
                }
                stats.in_range += 1;

                // validate() bounds both axes by MAX_AXIS_PIXELS
                let sample = DepthSample::new(column as u16, row as u16, depth);
                let z = geometry.height(sample);

                let Some((band_index, band)) = self.bands.lookup(z) else {
                    stats.out_of_band += 1;
                    continue;
                };

                match geometry.transform(sample, Some(band.range())) {
                    Projection::Point(point) => {
                        stats.band_points[band_index] += 1;
                        sink.emit(&ClassifiedPoint {
                            point,
                            band: band_index,
                            color: band.color,
                        });
                    }
                    Projection::NotClassified => stats.out_of_band += 1,
                }
            }
        }

        Ok(stats)
    }
}
