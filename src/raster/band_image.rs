//! Multi-band composite image

use std::collections::BTreeMap;

use log::debug;

use crate::coordinate::BoundingBox;
use crate::source::Satellite;

use super::band::Band;
use super::errors::{RiskError, RiskResult};
use super::grid::Grid;

/// A cloud-filtered composite with canonically named reflectance bands
///
/// Every band shares the same dimensions. The image is immutable once
/// built; index layers are derived from it without modifying it.
#[derive(Debug, Clone)]
pub struct BandImage {
    satellite: Satellite,
    bounds: BoundingBox,
    pixel_size_m: f64,
    width: u32,
    height: u32,
    bands: BTreeMap<Band, Grid<f32>>,
}

impl BandImage {
    /// Assemble an image from per-band grids
    ///
    /// # Arguments
    /// * `satellite` - Mission the bands were acquired by
    /// * `bounds` - Geographic extent (EPSG:4326)
    /// * `pixel_size_m` - Ground size of one pixel edge in metres
    /// * `bands` - Reflectance grid per band
    ///
    /// # Returns
    /// The image, or an error if no bands were given or their sizes differ
    pub fn new(
        satellite: Satellite,
        bounds: BoundingBox,
        pixel_size_m: f64,
        bands: BTreeMap<Band, Grid<f32>>,
    ) -> RiskResult<Self> {
        let Some(first) = bands.values().next() else {
            return Err(RiskError::GenericError("Image must contain at least one band".to_string()));
        };

        for grid in bands.values() {
            first.check_same_size(grid)?;
        }

        if pixel_size_m <= 0.0 {
            return Err(RiskError::InvalidArgument(format!(
                "Pixel size must be positive, got {}", pixel_size_m
            )));
        }

        let (width, height) = first.dimensions();
        debug!("Built {} image {}x{} with {} bands", satellite, width, height, bands.len());

        Ok(BandImage {
            satellite,
            bounds,
            pixel_size_m,
            width,
            height,
            bands,
        })
    }

    /// Get a band grid
    pub fn band(&self, band: Band) -> RiskResult<&Grid<f32>> {
        self.bands.get(&band).ok_or(RiskError::MissingBand(band))
    }

    pub fn has_band(&self, band: Band) -> bool {
        self.bands.contains_key(&band)
    }

    /// Bands present in this image, in wavelength order
    pub fn band_names(&self) -> Vec<Band> {
        self.bands.keys().copied().collect()
    }

    pub fn satellite(&self) -> Satellite {
        self.satellite
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn pixel_size_m(&self) -> f64 {
        self.pixel_size_m
    }

    /// Area covered by a single pixel in square kilometres
    pub fn pixel_area_km2(&self) -> f64 {
        self.pixel_size_m * self.pixel_size_m / 1e6
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
