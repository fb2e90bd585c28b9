//! Composite wildfire-risk score
//!
//! Four inputs are rescaled to 0..100 risk components and combined with
//! fixed weights:
//!
//! | component  | input    | rescaling                     | weight |
//! |------------|----------|-------------------------------|--------|
//! | vegetation | NDVI     | `(1 - (NDVI + 1) / 2) * 100`  | 0.4    |
//! | moisture   | NDMI     | `(1 - (NDMI + 1) / 2) * 100`  | 0.3    |
//! | soil       | BSI      | `((BSI + 1) / 2) * 100`       | 0.2    |
//! | stress     | redness  | `redness * 100`               | 0.1    |
//!
//! Each component is clamped to 0..100 before weighting and the sum is
//! clamped to 0..100 again.

use log::info;

use crate::indices::{combine, IndexSet, PlantColor, SpectralIndex};
use crate::raster::errors::RiskResult;
use crate::raster::grid::{is_no_data, Grid, NO_DATA};

/// Lowest possible score
pub const MIN_SCORE: f32 = 0.0;
/// Highest possible score
pub const MAX_SCORE: f32 = 100.0;

/// Fixed component weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub vegetation: f32,
    pub moisture: f32,
    pub soil: f32,
    pub stress: f32,
}

/// Vegetation health 40%, moisture 30%, soil exposure 20%, plant stress 10%
pub const WEIGHTS: RiskWeights = RiskWeights {
    vegetation: 0.4,
    moisture: 0.3,
    soil: 0.2,
    stress: 0.1,
};

/// Risk components for one pixel, each in 0..100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskComponents {
    pub vegetation: f32,
    pub moisture: f32,
    pub soil: f32,
    pub stress: f32,
}

impl RiskComponents {
    /// Rescale raw inputs into risk components
    pub fn from_inputs(ndvi: f32, ndmi: f32, bsi: f32, redness: f32) -> Self {
        RiskComponents {
            vegetation: vegetation_risk(ndvi),
            moisture: moisture_risk(ndmi),
            soil: soil_risk(bsi),
            stress: stress_risk(redness),
        }
    }

    /// Weighted sum, clamped to 0..100
    pub fn score(&self) -> f32 {
        let raw = WEIGHTS.vegetation * self.vegetation
            + WEIGHTS.moisture * self.moisture
            + WEIGHTS.soil * self.soil
            + WEIGHTS.stress * self.stress;
        raw.clamp(MIN_SCORE, MAX_SCORE)
    }
}

#[inline]
fn to_percent(fraction: f32) -> f32 {
    (fraction * 100.0).clamp(MIN_SCORE, MAX_SCORE)
}

/// Low NDVI means sparse or dry vegetation, so high risk
pub fn vegetation_risk(ndvi: f32) -> f32 {
    to_percent(1.0 - (ndvi + 1.0) / 2.0)
}

/// Low NDMI means low canopy moisture, so high risk
pub fn moisture_risk(ndmi: f32) -> f32 {
    to_percent(1.0 - (ndmi + 1.0) / 2.0)
}

/// High BSI means exposed soil, so high risk
pub fn soil_risk(bsi: f32) -> f32 {
    to_percent((bsi + 1.0) / 2.0)
}

/// High redness means stressed plants, so high risk
pub fn stress_risk(redness: f32) -> f32 {
    to_percent(redness)
}

/// Score one pixel from its raw inputs
///
/// Returns [`NO_DATA`] if any input is no-data.
pub fn score_pixel(ndvi: f32, ndmi: f32, bsi: f32, redness: f32) -> f32 {
    if [ndvi, ndmi, bsi, redness].iter().any(|v| is_no_data(*v)) {
        return NO_DATA;
    }
    RiskComponents::from_inputs(ndvi, ndmi, bsi, redness).score()
}

/// Combine already-normalized components (each 0..100) into a score
pub fn score_components(vegetation: f32, moisture: f32, soil: f32, stress: f32) -> f32 {
    RiskComponents { vegetation, moisture, soil, stress }.score()
}

/// Computes the risk score layer from index layers
pub struct RiskScorer;

impl RiskScorer {
    /// Score every pixel
    ///
    /// # Arguments
    /// * `ndvi` - NDVI layer
    /// * `ndmi` - NDMI layer
    /// * `bsi` - BSI layer
    /// * `redness` - Plant stress ratio layer
    ///
    /// # Returns
    /// A 0..100 score grid with no-data wherever an input is no-data
    pub fn score(
        ndvi: &Grid<f32>,
        ndmi: &Grid<f32>,
        bsi: &Grid<f32>,
        redness: &Grid<f32>,
    ) -> RiskResult<Grid<f32>> {
        info!("Scoring fire risk over {}x{} pixels", ndvi.width(), ndvi.height());
        combine(&[ndvi, ndmi, bsi, redness], |v| score_pixel(v[0], v[1], v[2], v[3]))
    }

    /// Score from a computed index set and plant colour layers
    pub fn score_layers(indices: &IndexSet, color: &PlantColor) -> RiskResult<Grid<f32>> {
        Self::score(
            indices.grid(SpectralIndex::Ndvi)?,
            indices.grid(SpectralIndex::Ndmi)?,
            indices.grid(SpectralIndex::Bsi)?,
            &color.redness,
        )
    }
}
