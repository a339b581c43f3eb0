//! Frame-rate gate in front of the classifier.
//!
//! A frame is accepted when at least the minimum interval
//! (`1 / target_fps`) has elapsed since the last accepted frame; otherwise
//! it is dropped and the last-accepted timestamp is left unchanged. There
//! is no queue: a dropped frame is gone.
//!
//! ```rust,ignore
//! let mut scheduler = FrameScheduler::new(SchedulerConfig::default());
//!
//! if scheduler.offer(frame.timestamp_us) {
//!     classifier.classify(&geometry, &frame, ...);
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the frame scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Processing ceiling (frames per second).
    ///
    /// Zero or negative disables the gate.
    ///
    /// Default: 15.0
    #[serde(default = "default_target_fps")]
    pub target_fps: f32,
}

fn default_target_fps() -> f32 {
    15.0
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { target_fps: 15.0 }
    }
}

impl SchedulerConfig {
    /// Minimum time between accepted frames (microseconds).
    pub fn min_interval_us(&self) -> f64 {
        if self.target_fps > 0.0 {
            1_000_000.0 / self.target_fps as f64
        } else {
            0.0
        }
    }
}

/// Minimum-interval gate over frame timestamps.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    config: SchedulerConfig,

    /// Cached `1 / target_fps` in microseconds
    min_interval_us: f64,

    /// Last accepted timestamp (microseconds)
    last_accepted_us: Option<u64>,

    accepted_count: u64,
    dropped_count: u64,
}

impl FrameScheduler {
    /// Create a scheduler that has not yet seen a frame.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            min_interval_us: config.min_interval_us(),
            config,
            last_accepted_us: None,
            accepted_count: 0,
            dropped_count: 0,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Check if a frame arriving at `timestamp_us` would be accepted.
    ///
    /// The first frame is always accepted. A timestamp earlier than the
    /// last accepted one counts as zero elapsed time.
    pub fn should_accept(&self, timestamp_us: u64) -> bool {
        let Some(last) = self.last_accepted_us else {
            return true;
        };
        let elapsed = timestamp_us.saturating_sub(last) as f64;
        elapsed >= self.min_interval_us
    }

    /// Record an accepted frame.
    pub fn accept(&mut self, timestamp_us: u64) {
        self.last_accepted_us = Some(timestamp_us);
        self.accepted_count += 1;
    }

    /// Record a dropped frame.
    pub fn reject(&mut self) {
        self.dropped_count += 1;
    }

    /// Check and record in one step. Returns true if the frame should be
    /// processed.
    pub fn offer(&mut self, timestamp_us: u64) -> bool {
        if self.should_accept(timestamp_us) {
            self.accept(timestamp_us);
            true
        } else {
            log::trace!("Frame at {timestamp_us}us dropped by rate gate");
            self.reject();
            false
        }
    }

    /// Number of accepted frames.
    #[inline]
    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    /// Number of dropped frames.
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count
    }

    /// Total frames offered.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.accepted_count + self.dropped_count
    }

    /// Accepted fraction of offered frames (1.0 before any frame).
    pub fn acceptance_rate(&self) -> f32 {
        let total = self.total_count();
        if total == 0 {
            1.0
        } else {
            self.accepted_count as f32 / total as f32
        }
    }

    /// Timestamp of the last accepted frame.
    #[inline]
    pub fn last_accepted_us(&self) -> Option<u64> {
        self.last_accepted_us
    }

    /// Forget the last accepted frame and the counters.
    pub fn reset(&mut self) {
        self.last_accepted_us = None;
        self.accepted_count = 0;
        self.dropped_count = 0;
    }
}
