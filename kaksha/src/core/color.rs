//! Packed ARGB colors for map cells.

use serde::{Deserialize, Serialize};

/// A 32-bit `0xAARRGGBB` color.
///
/// Stored little-endian this is the BGRA byte order display surfaces
/// expect; [`Color::to_rgba`] unpacks it for image encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent background.
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    /// Opaque red.
    pub const RED: Color = Color(0xffff_0000);
    /// Opaque green.
    pub const GREEN: Color = Color(0xff00_ff00);
    /// Opaque blue.
    pub const BLUE: Color = Color(0xff00_00ff);

    /// Build from components.
    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Unpack to `[r, g, b, a]`.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
            (self.0 >> 24) as u8,
        ]
    }

    /// Whether the color is the transparent background.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack() {
        assert_eq!(Color::RED.to_rgba(), [255, 0, 0, 255]);
        assert_eq!(Color::BLUE.to_rgba(), [0, 0, 255, 255]);
        assert_eq!(Color::from_argb(0x80, 1, 2, 3).to_rgba(), [1, 2, 3, 0x80]);
        assert_eq!(Color::GREEN.alpha(), 255);
    }

    #[test]
    fn test_serde_as_integer() {
        let yaml = serde_yaml::to_string(&Color::RED).unwrap();
        assert_eq!(yaml.trim(), "4294901760");
        let parsed: Color = serde_yaml::from_str("4278255360").unwrap();
        assert_eq!(parsed, Color::GREEN);
    }
}
