//! Raster primitives
//!
//! Pixel grids, canonical band names, the multi-band composite image and
//! array file I/O shared by the rest of the crate.

pub mod errors;
pub mod band;
pub mod grid;
pub mod band_image;
pub mod array_io;
pub mod resample;
mod tests;

pub use errors::{RiskError, RiskResult};
pub use band::Band;
pub use grid::{is_no_data, Grid, NO_DATA};
pub use band_image::BandImage;
pub use array_io::{load_csv, save_grid, ArrayFormat};
pub use resample::resample_nearest;
