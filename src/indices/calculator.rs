//! Index layer computation over whole images

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use crate::raster::band::Band;
use crate::raster::band_image::BandImage;
use crate::raster::errors::{RiskError, RiskResult};
use crate::raster::grid::Grid;

use super::formulas;

/// Supported spectral indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpectralIndex {
    /// Normalized Difference Vegetation Index
    Ndvi,
    /// Soil Adjusted Vegetation Index
    Savi,
    /// Enhanced Vegetation Index
    Evi,
    /// Normalized Difference Moisture Index
    Ndmi,
    /// Normalized Burn Ratio
    Nbr,
    /// Bare Soil Index
    Bsi,
}

impl SpectralIndex {
    /// All indices in report order
    pub const ALL: [SpectralIndex; 6] = [
        SpectralIndex::Ndvi,
        SpectralIndex::Savi,
        SpectralIndex::Evi,
        SpectralIndex::Ndmi,
        SpectralIndex::Nbr,
        SpectralIndex::Bsi,
    ];

    /// Layer name as used in reports and exported file names
    pub fn name(&self) -> &'static str {
        match self {
            SpectralIndex::Ndvi => "NDVI",
            SpectralIndex::Savi => "SAVI",
            SpectralIndex::Evi => "EVI",
            SpectralIndex::Ndmi => "NDMI",
            SpectralIndex::Nbr => "NBR",
            SpectralIndex::Bsi => "BSI",
        }
    }

    /// Bands the formula reads
    pub fn required_bands(&self) -> &'static [Band] {
        match self {
            SpectralIndex::Ndvi | SpectralIndex::Savi => &[Band::Nir, Band::Red],
            SpectralIndex::Evi => &[Band::Nir, Band::Red, Band::Blue],
            SpectralIndex::Ndmi => &[Band::Nir, Band::Swir1],
            SpectralIndex::Nbr => &[Band::Nir, Band::Swir2],
            SpectralIndex::Bsi => &[Band::Swir1, Band::Red, Band::Nir, Band::Blue],
        }
    }

    /// Closed range the formula is bounded by for reflectance in [0, 1]
    ///
    /// EVI has no finite bound because its denominator can approach zero.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        match self {
            SpectralIndex::Ndvi | SpectralIndex::Ndmi | SpectralIndex::Nbr | SpectralIndex::Bsi => {
                Some((-1.0, 1.0))
            }
            SpectralIndex::Savi => Some((-1.0 - formulas::SAVI_L, 1.0 + formulas::SAVI_L)),
            SpectralIndex::Evi => None,
        }
    }
}

impl fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SpectralIndex {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpectralIndex::ALL
            .iter()
            .copied()
            .find(|idx| idx.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RiskError::InvalidArgument(format!("Unknown index: {}", s)))
    }
}

/// A per-pixel grid derived from an image by one formula
#[derive(Debug, Clone)]
pub struct IndexLayer {
    pub index: SpectralIndex,
    pub grid: Grid<f32>,
}

/// Plant colour layers derived from the visible and NIR bands
#[derive(Debug, Clone)]
pub struct PlantColor {
    /// `NIR - Red`
    pub greenness: Grid<f32>,
    /// `Red / (NIR + 0.0001)`, the plant stress ratio
    pub redness: Grid<f32>,
    /// Mean of Red, Green and Blue
    pub brightness: Grid<f32>,
}

/// Every index layer computed from one image
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    layers: BTreeMap<SpectralIndex, IndexLayer>,
}

impl IndexSet {
    pub fn get(&self, index: SpectralIndex) -> Option<&IndexLayer> {
        self.layers.get(&index)
    }

    /// Get a layer's grid, failing if it was not computed
    pub fn grid(&self, index: SpectralIndex) -> RiskResult<&Grid<f32>> {
        self.layers
            .get(&index)
            .map(|layer| &layer.grid)
            .ok_or_else(|| RiskError::GenericError(format!("{} layer was not computed", index)))
    }

    pub fn insert(&mut self, layer: IndexLayer) {
        self.layers.insert(layer.index, layer);
    }

    /// Layers in report order
    pub fn iter(&self) -> impl Iterator<Item = &IndexLayer> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Computes index layers from a band image
pub struct IndexCalculator<'a> {
    image: &'a BandImage,
    savi_l: f32,
}

impl<'a> IndexCalculator<'a> {
    /// Create a calculator for an image with the default SAVI factor
    pub fn new(image: &'a BandImage) -> Self {
        IndexCalculator {
            image,
            savi_l: formulas::SAVI_L,
        }
    }

    /// Override the SAVI soil brightness factor
    pub fn with_savi_l(mut self, l: f32) -> Self {
        self.savi_l = l;
        self
    }

    /// Compute one index layer
    ///
    /// # Returns
    /// The layer, or `MissingBand` if the image lacks an input band
    pub fn compute(&self, index: SpectralIndex) -> RiskResult<IndexLayer> {
        debug!("Computing {} over {}x{} pixels", index, self.image.width(), self.image.height());

        let bands = index
            .required_bands()
            .iter()
            .map(|band| self.image.band(*band))
            .collect::<RiskResult<Vec<_>>>()?;

        let savi_l = self.savi_l;
        let grid = combine(&bands, |v| match index {
            SpectralIndex::Ndvi => formulas::ndvi(v[0], v[1]),
            SpectralIndex::Savi => formulas::savi(v[0], v[1], savi_l),
            SpectralIndex::Evi => formulas::evi(v[0], v[1], v[2]),
            SpectralIndex::Ndmi => formulas::ndmi(v[0], v[1]),
            SpectralIndex::Nbr => formulas::nbr(v[0], v[1]),
            SpectralIndex::Bsi => formulas::bsi(v[0], v[1], v[2], v[3]),
        })?;

        Ok(IndexLayer { index, grid })
    }

    /// Compute every supported index
    pub fn compute_all(&self) -> RiskResult<IndexSet> {
        info!("Computing {} spectral indices", SpectralIndex::ALL.len());

        let mut set = IndexSet::default();
        for index in SpectralIndex::ALL {
            set.insert(self.compute(index)?);
        }
        Ok(set)
    }

    /// Compute the plant colour layers
    pub fn plant_color(&self) -> RiskResult<PlantColor> {
        let red = self.image.band(Band::Red)?;
        let nir = self.image.band(Band::Nir)?;
        let green = self.image.band(Band::Green)?;
        let blue = self.image.band(Band::Blue)?;

        Ok(PlantColor {
            greenness: combine(&[nir, red], |v| formulas::greenness(v[0], v[1]))?,
            redness: combine(&[red, nir], |v| formulas::redness(v[0], v[1]))?,
            brightness: combine(&[red, green, blue], |v| formulas::brightness(v[0], v[1], v[2]))?,
        })
    }
}

/// Apply a per-pixel function across aligned grids
///
/// `f` receives the values of every input grid at one pixel, in input order.
pub fn combine<F>(grids: &[&Grid<f32>], f: F) -> RiskResult<Grid<f32>>
where
    F: Fn(&[f32]) -> f32,
{
    let Some(first) = grids.first() else {
        return Err(RiskError::GenericError("No input grids to combine".to_string()));
    };

    for grid in grids.iter().skip(1) {
        first.check_same_size(grid)?;
    }

    let mut pixel = vec![0.0f32; grids.len()];
    let data = (0..first.len())
        .map(|idx| {
            for (slot, grid) in pixel.iter_mut().zip(grids) {
                *slot = grid.values()[idx];
            }
            f(&pixel)
        })
        .collect();

    Grid::from_vec(first.width(), first.height(), data)
}
