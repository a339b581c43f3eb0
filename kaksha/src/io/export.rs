//! PNG export of the intensity buffer and the flat map.

use std::path::Path;

use image::{GrayImage, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::flatmap::FlatMap;

/// Image export failure.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Buffer length does not match the image dimensions
    #[error("buffer holds {actual} bytes, {width}x{height} image needs {expected}")]
    Dimensions {
        /// Image width
        width: usize,
        /// Image height
        height: usize,
        /// Required buffer length
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// Encoding or file error
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Wrap an intensity buffer as an 8-bit grayscale image.
pub fn intensity_image(intensity: &[u8], width: usize, height: usize) -> Result<GrayImage, ExportError> {
    let mismatch = || ExportError::Dimensions {
        width,
        height,
        expected: width * height,
        actual: intensity.len(),
    };
    let (w, h) = (
        u32::try_from(width).map_err(|_| mismatch())?,
        u32::try_from(height).map_err(|_| mismatch())?,
    );
    GrayImage::from_raw(w, h, intensity.to_vec()).ok_or_else(mismatch)
}

/// Render the flat map as an RGBA image; unpainted cells are transparent.
pub fn flat_map_image(map: &FlatMap) -> Result<RgbaImage, ExportError> {
    let (columns, rows) = map.dimensions();
    let bytes = map.to_rgba_bytes();
    let mismatch = |actual| ExportError::Dimensions {
        width: columns,
        height: rows,
        expected: columns * rows * 4,
        actual,
    };
    let len = bytes.len();
    let (w, h) = (
        u32::try_from(columns).map_err(|_| mismatch(len))?,
        u32::try_from(rows).map_err(|_| mismatch(len))?,
    );
    RgbaImage::from_raw(w, h, bytes).ok_or_else(|| mismatch(len))
}

/// Write an intensity buffer as a grayscale PNG.
pub fn save_intensity_png(
    path: &Path,
    intensity: &[u8],
    width: usize,
    height: usize,
) -> Result<(), ExportError> {
    intensity_image(intensity, width, height)?.save_with_format(path, ImageFormat::Png)?;
    log::info!("Wrote intensity image {}", path.display());
    Ok(())
}

/// Write the flat map as an RGBA PNG.
pub fn save_flat_map_png(path: &Path, map: &FlatMap) -> Result<(), ExportError> {
    flat_map_image(map)?.save_with_format(path, ImageFormat::Png)?;
    log::info!(
        "Wrote flat map {} ({} painted cells)",
        path.display(),
        map.painted_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Point2D};
    use crate::flatmap::MapExtent;

    #[test]
    fn test_intensity_image() {
        let img = intensity_image(&[0, 64, 128, 255, 1, 2], 3, 2).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 1).0, [255]);
    }

    #[test]
    fn test_intensity_size_mismatch() {
        assert!(matches!(
            intensity_image(&[0; 5], 3, 2),
            Err(ExportError::Dimensions { expected: 6, actual: 5, .. })
        ));
    }

    #[test]
    fn test_flat_map_image_colors() {
        let mut map = FlatMap::new(MapExtent::new(2.0, 2.0), 2, 2);
        map.plot(Point2D::new(0.5, -0.5), Color::GREEN);
        let img = flat_map_image(&map).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let map = FlatMap::new(MapExtent::new(2.0, 2.0), 4, 4);
        save_flat_map_png(&path, &map).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 4));
    }
}
