//! Console report formatting

use std::fmt;

use crate::indices::{IndexSet, PlantColor, SpectralIndex};
use crate::raster::grid::Grid;
use crate::risk::{OverallRisk, RiskClass};

use super::statistics::{ClassAreaSummary, LayerStatistics};

const RULE_WIDTH: usize = 70;

/// Where and when the analyzed imagery came from
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub satellite: String,
    pub area: String,
    pub dates: String,
    pub width: u32,
    pub height: u32,
    pub pixel_size_m: f64,
}

/// Statistics report for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub context: Option<ReportContext>,
    pub index_stats: Vec<(SpectralIndex, Option<LayerStatistics>)>,
    pub color_stats: Vec<(&'static str, Option<LayerStatistics>)>,
    pub score_stats: Option<LayerStatistics>,
    pub class_areas: ClassAreaSummary,
}

impl AnalysisReport {
    /// Summarize computed layers
    ///
    /// # Arguments
    /// * `indices` - Index layers
    /// * `color` - Plant colour layers
    /// * `scores` - Risk score layer
    /// * `classes` - Risk class layer
    /// * `pixel_area_km2` - Ground area of one pixel
    pub fn from_layers(
        indices: &IndexSet,
        color: &PlantColor,
        scores: &Grid<f32>,
        classes: &Grid<Option<RiskClass>>,
        pixel_area_km2: f64,
    ) -> Self {
        let index_stats = indices
            .iter()
            .map(|layer| (layer.index, LayerStatistics::from_grid(&layer.grid)))
            .collect();

        let color_stats = vec![
            ("Greenness", LayerStatistics::from_grid(&color.greenness)),
            ("Redness", LayerStatistics::from_grid(&color.redness)),
            ("Brightness", LayerStatistics::from_grid(&color.brightness)),
        ];

        AnalysisReport {
            context: None,
            index_stats,
            color_stats,
            score_stats: LayerStatistics::from_grid(scores),
            class_areas: ClassAreaSummary::from_classes(classes, pixel_area_km2),
        }
    }

    /// Attach acquisition details shown in the report header
    pub fn with_context(mut self, context: ReportContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Statistics for one index, if it was computed and has valid pixels
    pub fn index(&self, index: SpectralIndex) -> Option<&LayerStatistics> {
        self.index_stats
            .iter()
            .find(|(i, _)| *i == index)
            .and_then(|(_, stats)| stats.as_ref())
    }

    /// Mean risk score over valid pixels
    pub fn mean_score(&self) -> Option<f64> {
        self.score_stats.map(|s| s.mean)
    }

    /// Area-wide verdict, None when no pixel could be scored
    pub fn overall(&self) -> Option<OverallRisk> {
        self.mean_score().map(|m| OverallRisk::from_mean_score(m as f32))
    }

    fn write_section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))
    }

    fn write_layer(f: &mut fmt::Formatter<'_>, name: &str, stats: &Option<LayerStatistics>) -> fmt::Result {
        match stats {
            Some(s) => {
                writeln!(f, "{} - Mean: {:.3}, Std: {:.3}", name, s.mean, s.std_dev)?;
                writeln!(f, "{:width$}   Range: [{:.3}, {:.3}]", "", s.min, s.max, width = name.len())
            }
            None => writeln!(f, "{} - no valid pixels", name),
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "FIRE RISK VEGETATION ANALYSIS REPORT")?;
        writeln!(f, "{}", rule)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "Satellite: {}", ctx.satellite)?;
            writeln!(f, "Area: {}", ctx.area)?;
            writeln!(f, "Dates: {}", ctx.dates)?;
            writeln!(f, "Grid: {}x{} pixels at {} m", ctx.width, ctx.height, ctx.pixel_size_m)?;
        }

        Self::write_section(f, "1. VEGETATION INDICES SUMMARY")?;
        for (index, stats) in &self.index_stats {
            Self::write_layer(f, index.name(), stats)?;
        }
        for (name, stats) in &self.color_stats {
            Self::write_layer(f, name, stats)?;
        }

        Self::write_section(f, "2. FIRE RISK DISTRIBUTION")?;
        for (class, _, area, percent) in self.class_areas.rows() {
            writeln!(f, "{:12}: {:.2} km² ({:.1}%)", class.label(), area, percent)?;
        }
        writeln!(f, "{:12}: {:.2} km²", "Total", self.class_areas.total_valid_area_km2())?;
        if self.class_areas.no_data_pixels() > 0 {
            writeln!(f, "{:12}: {} pixels excluded", "No data", self.class_areas.no_data_pixels())?;
        }

        Self::write_section(f, "3. OVERALL FIRE RISK ASSESSMENT")?;
        match (self.mean_score(), self.overall()) {
            (Some(mean), Some(overall)) => {
                writeln!(f, "Average Fire Risk Score: {:.2}/100", mean)?;
                writeln!(f, "Overall Risk Level: {}", overall.label())?;
                writeln!(f, "Recommendation: {}", overall.recommendation())?;
            }
            _ => writeln!(f, "No valid pixels to assess")?,
        }

        writeln!(f)?;
        writeln!(f, "{}", rule)
    }
}
