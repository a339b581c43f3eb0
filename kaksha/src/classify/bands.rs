//! Height bands used to color classified points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Color;
use crate::geometry::HeightRange;

/// Invalid band definitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BandError {
    /// No bands configured
    #[error("at least one height band is required")]
    Empty,

    /// Band with start >= end
    #[error("band '{name}' is empty: [{start}, {end})")]
    Inverted {
        /// Band name
        name: String,
        /// Lower bound
        start: f32,
        /// Upper bound
        end: f32,
    },

    /// Two bands share heights
    #[error("bands '{first}' and '{second}' overlap")]
    Overlap {
        /// Earlier band
        first: String,
        /// Later band
        second: String,
    },
}

/// A named height interval with its map color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZBand {
    /// Display name
    pub name: String,
    /// Inclusive lower height (m)
    pub z_min: f32,
    /// Exclusive upper height (m)
    pub z_max: f32,
    /// Cell color for points in this band
    pub color: Color,
}

impl ZBand {
    /// Create a new band.
    pub fn new(name: impl Into<String>, z_min: f32, z_max: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            z_min,
            z_max,
            color,
        }
    }

    /// The band's `[z_min, z_max)` interval.
    #[inline]
    pub fn range(&self) -> HeightRange {
        HeightRange::new(self.z_min, self.z_max)
    }

    /// Whether the band contains height `z`.
    #[inline]
    pub fn contains(&self, z: f32) -> bool {
        self.range().contains(z)
    }
}

/// Ordered, non-overlapping set of height bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ZBands {
    bands: Vec<ZBand>,
}

impl ZBands {
    /// Validate and wrap a band list.
    pub fn new(bands: Vec<ZBand>) -> Result<Self, BandError> {
        if bands.is_empty() {
            return Err(BandError::Empty);
        }

        for band in &bands {
            // Also rejects NaN bounds
            if !(band.z_min < band.z_max) {
                return Err(BandError::Inverted {
                    name: band.name.clone(),
                    start: band.z_min,
                    end: band.z_max,
                });
            }
        }

        for (i, a) in bands.iter().enumerate() {
            for b in &bands[i + 1..] {
                if a.range().overlaps(&b.range()) {
                    return Err(BandError::Overlap {
                        first: a.name.clone(),
                        second: b.name.clone(),
                    });
                }
            }
        }

        Ok(Self { bands })
    }

    /// The band containing `z`, with its index.
    #[inline]
    pub fn lookup(&self, z: f32) -> Option<(usize, &ZBand)> {
        self.bands.iter().enumerate().find(|(_, b)| b.contains(z))
    }

    /// Number of bands.
    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Always false for a validated set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Band by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ZBand> {
        self.bands.get(index)
    }

    /// Iterate bands in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &ZBand> {
        self.bands.iter()
    }
}

impl Default for ZBands {
    /// Floor-level, waist-level and head-level bands around a camera at z = 0.
    fn default() -> Self {
        Self {
            bands: vec![
                ZBand::new("low", -1.5, -0.5, Color::BLUE),
                ZBand::new("mid", -0.5, 0.5, Color::RED),
                ZBand::new("high", 0.5, 1.5, Color::GREEN),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands_valid() {
        let bands = ZBands::default();
        assert_eq!(ZBands::new(bands.iter().cloned().collect()), Ok(bands));
    }

    #[test]
    fn test_lookup() {
        let bands = ZBands::default();
        assert_eq!(bands.lookup(0.0).map(|(i, _)| i), Some(1));
        assert_eq!(bands.lookup(-0.5).map(|(i, _)| i), Some(1));
        assert_eq!(bands.lookup(-0.51).map(|(i, _)| i), Some(0));
        assert_eq!(bands.lookup(1.2).map(|(_, b)| b.color), Some(Color::GREEN));
        assert!(bands.lookup(1.5).is_none());
        assert!(bands.lookup(-3.0).is_none());
        assert!(bands.lookup(f32::NAN).is_none());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(ZBands::new(Vec::new()), Err(BandError::Empty));
    }

    #[test]
    fn test_inverted_rejected() {
        let result = ZBands::new(vec![ZBand::new("bad", 0.5, 0.5, Color::RED)]);
        assert!(matches!(result, Err(BandError::Inverted { .. })));
    }

    #[test]
    fn test_overlap_rejected() {
        let result = ZBands::new(vec![
            ZBand::new("a", 0.0, 1.0, Color::RED),
            ZBand::new("b", 0.9, 2.0, Color::GREEN),
        ]);
        assert_eq!(
            result,
            Err(BandError::Overlap {
                first: "a".to_string(),
                second: "b".to_string()
            })
        );
    }

    #[test]
    fn test_adjacent_bands_allowed() {
        let bands = ZBands::new(vec![
            ZBand::new("b", 1.0, 2.0, Color::GREEN),
            ZBand::new("a", 0.0, 1.0, Color::RED),
        ])
        .unwrap();
        assert_eq!(bands.lookup(1.0).map(|(_, b)| b.name.as_str()), Some("b"));
    }
}
