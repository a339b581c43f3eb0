//! Image export of pipeline outputs.
//!
//! ```rust,ignore
//! use kaksha::io::{save_flat_map_png, save_intensity_png};
//!
//! save_intensity_png(Path::new("depth.png"), mapper.intensity(), 512, 424)?;
//! save_flat_map_png(Path::new("map.png"), &mapper.flat_map().read())?;
//! ```

mod export;

pub use export::{
    ExportError, flat_map_image, intensity_image, save_flat_map_png, save_intensity_png,
};
