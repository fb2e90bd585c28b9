//! Spectral indices
//!
//! NDVI, SAVI, EVI, NDMI, NBR and BSI, plus the plant colour layers the
//! risk scorer reads. Formulas live in [`formulas`] as per-pixel functions;
//! [`IndexCalculator`] applies them across a whole [`BandImage`].
//!
//! [`BandImage`]: crate::raster::BandImage

pub mod formulas;
pub mod calculator;
pub(crate) mod tests;

pub use calculator::{combine, IndexCalculator, IndexLayer, IndexSet, PlantColor, SpectralIndex};
