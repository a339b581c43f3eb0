//! Per-frame classification counters.

/// Counters for one processed frame (or a merged run).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames merged into these counters
    pub frames: usize,
    /// Pixels scanned
    pub pixels: usize,
    /// Pixels with depth inside the reliable range
    pub in_range: usize,
    /// Pixels with depth outside the reliable range
    pub out_of_range: usize,
    /// In-range pixels whose height matched no band
    pub out_of_band: usize,
    /// Points emitted per band, in band order
    pub band_points: Vec<usize>,
    /// Flat-map cells written
    pub cells_written: usize,
    /// Points that fell outside the flat map
    pub cells_dropped: usize,
}

impl FrameStats {
    /// Empty counters for a run with `band_count` bands.
    pub fn new(band_count: usize) -> Self {
        Self {
            band_points: vec![0; band_count],
            ..Default::default()
        }
    }

    /// Total points emitted across all bands.
    pub fn points(&self) -> usize {
        self.band_points.iter().sum()
    }

    /// Merge another frame's counters into these.
    pub fn merge(&mut self, other: &FrameStats) {
        self.frames += other.frames;
        self.pixels += other.pixels;
        self.in_range += other.in_range;
        self.out_of_range += other.out_of_range;
        self.out_of_band += other.out_of_band;
        if self.band_points.len() < other.band_points.len() {
            self.band_points.resize(other.band_points.len(), 0);
        }
        for (total, &n) in self.band_points.iter_mut().zip(&other.band_points) {
            *total += n;
        }
        self.cells_written += other.cells_written;
        self.cells_dropped += other.cells_dropped;
    }
}
