//! Statistics, console reports and layer export

pub mod statistics;
pub mod console;
pub mod export;
mod tests;

pub use statistics::{ClassAreaSummary, LayerStatistics};
pub use console::{AnalysisReport, ReportContext};
pub use export::export_layers;
