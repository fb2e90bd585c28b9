//! Summary statistics over layers and class grids

use crate::raster::grid::Grid;
use crate::risk::RiskClass;

/// Statistics over the valid pixels of a float layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStatistics {
    /// Number of pixels that are not no-data
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl LayerStatistics {
    /// Compute statistics, skipping no-data pixels
    ///
    /// # Arguments
    /// * `grid` - Layer to summarize
    ///
    /// # Returns
    /// The statistics, or None if every pixel is no-data
    pub fn from_grid(grid: &Grid<f32>) -> Option<Self> {
        Self::from_values(grid.valid_values())
    }

    /// Compute statistics over an iterator of defined values
    pub fn from_values<I: IntoIterator<Item = f32>>(values: I) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(LayerStatistics {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Pixel counts and ground area per risk class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAreaSummary {
    counts: [usize; 5],
    no_data: usize,
    pixel_area_km2: f64,
}

impl ClassAreaSummary {
    /// Tally a class grid
    ///
    /// # Arguments
    /// * `classes` - Per-pixel classes, `None` for no-data
    /// * `pixel_area_km2` - Ground area of one pixel in km²
    pub fn from_classes(classes: &Grid<Option<RiskClass>>, pixel_area_km2: f64) -> Self {
        let mut counts = [0usize; 5];
        let mut no_data = 0;

        for class in classes.values() {
            match class {
                Some(c) => counts[c.code() as usize - 1] += 1,
                None => no_data += 1,
            }
        }

        ClassAreaSummary { counts, no_data, pixel_area_km2 }
    }

    pub fn count(&self, class: RiskClass) -> usize {
        self.counts[class.code() as usize - 1]
    }

    pub fn area_km2(&self, class: RiskClass) -> f64 {
        self.count(class) as f64 * self.pixel_area_km2
    }

    /// Share of the valid area in this class, 0 when nothing is valid
    pub fn percent(&self, class: RiskClass) -> f64 {
        let total = self.valid_pixels();
        if total == 0 {
            0.0
        } else {
            self.count(class) as f64 * 100.0 / total as f64
        }
    }

    pub fn valid_pixels(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn no_data_pixels(&self) -> usize {
        self.no_data
    }

    pub fn total_valid_area_km2(&self) -> f64 {
        self.valid_pixels() as f64 * self.pixel_area_km2
    }

    pub fn pixel_area_km2(&self) -> f64 {
        self.pixel_area_km2
    }

    /// `(class, pixel count, km², percent)` rows from lowest to highest risk
    pub fn rows(&self) -> impl Iterator<Item = (RiskClass, usize, f64, f64)> + '_ {
        RiskClass::ALL
            .iter()
            .map(move |c| (*c, self.count(*c), self.area_km2(*c), self.percent(*c)))
    }
}
