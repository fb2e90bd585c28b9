//! Risk classification
//!
//! Scores are cut at 20, 40, 60 and 80. Each cut is the inclusive lower
//! bound of the class above it, so a score of exactly 20 is `Low` and
//! exactly 80 is `VeryHigh`.

use std::fmt;

use crate::raster::grid::{is_no_data, Grid, NO_DATA};

/// Class thresholds, each the inclusive lower bound of the next class
pub const CLASS_THRESHOLDS: [f32; 4] = [20.0, 40.0, 60.0, 80.0];

/// Five ordinal wildfire-risk categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskClass {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskClass {
    /// All classes from lowest to highest risk
    pub const ALL: [RiskClass; 5] = [
        RiskClass::VeryLow,
        RiskClass::Low,
        RiskClass::Moderate,
        RiskClass::High,
        RiskClass::VeryHigh,
    ];

    /// Classify a score
    ///
    /// # Returns
    /// The class, or None for a no-data score
    pub fn from_score(score: f32) -> Option<RiskClass> {
        if is_no_data(score) {
            return None;
        }

        // Count thresholds at or below the score: 20.0 passes the first cut
        let passed = CLASS_THRESHOLDS.iter().filter(|t| score >= **t).count();
        Some(RiskClass::ALL[passed])
    }

    /// Class code, 1 (very low) to 5 (very high)
    pub fn code(&self) -> u8 {
        match self {
            RiskClass::VeryLow => 1,
            RiskClass::Low => 2,
            RiskClass::Moderate => 3,
            RiskClass::High => 4,
            RiskClass::VeryHigh => 5,
        }
    }

    /// Class for a code from 1 to 5
    pub fn from_code(code: u8) -> Option<RiskClass> {
        RiskClass::ALL.iter().copied().find(|c| c.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskClass::VeryLow => "Very Low",
            RiskClass::Low => "Low",
            RiskClass::Moderate => "Moderate",
            RiskClass::High => "High",
            RiskClass::VeryHigh => "Very High",
        }
    }

    /// Score interval covered by the class, lower bound inclusive
    pub fn score_range(&self) -> (f32, f32) {
        let idx = self.code() as usize - 1;
        let lower = if idx == 0 { 0.0 } else { CLASS_THRESHOLDS[idx - 1] };
        let upper = if idx == CLASS_THRESHOLDS.len() { 100.0 } else { CLASS_THRESHOLDS[idx] };
        (lower, upper)
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify every pixel of a score grid
pub fn classify(scores: &Grid<f32>) -> Grid<Option<RiskClass>> {
    scores.map(RiskClass::from_score)
}

/// Class codes as floats with no-data for unclassified pixels, for export
pub fn class_codes(classes: &Grid<Option<RiskClass>>) -> Grid<f32> {
    classes.map(|c| c.map(|class| class.code() as f32).unwrap_or(NO_DATA))
}

/// Area-wide verdict from the mean risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl OverallRisk {
    /// Assess a mean score: below 30 low, below 50 moderate, below 70 high
    pub fn from_mean_score(mean: f32) -> OverallRisk {
        if mean < 30.0 {
            OverallRisk::Low
        } else if mean < 50.0 {
            OverallRisk::Moderate
        } else if mean < 70.0 {
            OverallRisk::High
        } else {
            OverallRisk::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverallRisk::Low => "LOW",
            OverallRisk::Moderate => "MODERATE",
            OverallRisk::High => "HIGH",
            OverallRisk::VeryHigh => "VERY HIGH",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            OverallRisk::Low => "Area shows healthy vegetation with low fire risk.",
            OverallRisk::Moderate => "Monitor conditions. Some areas may be fire-prone.",
            OverallRisk::High => "High fire risk. Implement prevention measures.",
            OverallRisk::VeryHigh => "Critical fire risk. Immediate action recommended.",
        }
    }
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
