//! Wildfire-risk scoring and classification

pub mod scorer;
pub mod classes;

pub use scorer::{score_components, score_pixel, RiskComponents, RiskScorer, RiskWeights, WEIGHTS};
pub use classes::{class_codes, classify, OverallRisk, RiskClass, CLASS_THRESHOLDS};
