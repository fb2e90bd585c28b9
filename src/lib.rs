pub mod utils;
pub mod raster;
pub mod coordinate;
pub mod source;
pub mod indices;
pub mod risk;
pub mod report;
pub mod config;
pub mod commands;
pub mod api;

pub use crate::api::{AnalysisResult, Analyzer, PixelAssessment, VegRisk};

pub use raster::{Band, BandImage, Grid, RiskError, RiskResult, NO_DATA};
pub use coordinate::{AreaOfInterest, BoundingBox, Point};
pub use source::{CompositeRequest, DateRange, ImageryProvider, LocalArchiveProvider, Satellite};
pub use indices::{IndexCalculator, SpectralIndex};
pub use risk::{OverallRisk, RiskClass, RiskScorer};
