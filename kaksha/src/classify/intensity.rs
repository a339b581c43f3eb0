//! Depth to display-intensity mapping.

/// Depth units per intensity step (integer division, = 31).
///
/// Fixed to the sensor's 8 m maximum and independent of the reliable
/// depth range used for classification.
pub const MAP_DEPTH_TO_BYTE: u16 = 8000 / 256;

/// Grayscale intensity for one depth sample.
///
/// In-range depths map to `depth / 31`, saturating at 255; depths outside
/// `[min_depth, max_depth]` map to 0.
#[inline]
pub fn depth_to_intensity(depth: u16, min_depth: u16, max_depth: u16) -> u8 {
    if depth >= min_depth && depth <= max_depth {
        (depth / MAP_DEPTH_TO_BYTE).min(u8::MAX as u16) as u8
    } else {
        0
    }
}
