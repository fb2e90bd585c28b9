use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

use crate::indices::formulas;
use crate::indices::{IndexCalculator, IndexSet, PlantColor, SpectralIndex};
use crate::raster::array_io::ArrayFormat;
use crate::raster::band_image::BandImage;
use crate::raster::errors::RiskResult;
use crate::raster::grid::{is_no_data, Grid};
use crate::report::{export_layers, AnalysisReport, ReportContext};
use crate::risk::{class_codes, classify, score_pixel, RiskClass, RiskComponents, RiskScorer};
use crate::source::{CompositeRequest, ImageryProvider, LocalArchiveProvider};
use crate::utils::logger::Logger;

/// File name of the exported risk score layer
pub const SCORE_LAYER: &str = "Fire_Risk_Score";
/// File name of the exported risk class layer
pub const CLASS_LAYER: &str = "Risk_Class";

/// Every layer produced by one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Composite the layers were derived from
    pub image: BandImage,
    pub indices: IndexSet,
    pub color: PlantColor,
    /// Risk score, 0..100
    pub scores: Grid<f32>,
    pub classes: Grid<Option<RiskClass>>,
    pub report: AnalysisReport,
}

impl AnalysisResult {
    /// Named float layers in export order
    ///
    /// Class codes are materialized as floats so they share the export path.
    pub fn layers(&self) -> Vec<(String, Grid<f32>)> {
        let mut layers: Vec<(String, Grid<f32>)> = self
            .indices
            .iter()
            .map(|layer| (layer.index.name().to_string(), layer.grid.clone()))
            .collect();

        layers.push(("Greenness".to_string(), self.color.greenness.clone()));
        layers.push(("Redness".to_string(), self.color.redness.clone()));
        layers.push(("Brightness".to_string(), self.color.brightness.clone()));
        layers.push((SCORE_LAYER.to_string(), self.scores.clone()));
        layers.push((CLASS_LAYER.to_string(), class_codes(&self.classes)));
        layers
    }
}

/// Index values and risk for a single pixel
#[derive(Debug, Clone, PartialEq)]
pub struct PixelAssessment {
    pub indices: Vec<(SpectralIndex, f32)>,
    pub greenness: f32,
    pub redness: f32,
    pub brightness: f32,
    /// None when an input needed by the score is no-data
    pub components: Option<RiskComponents>,
    pub score: f32,
    pub class: Option<RiskClass>,
}

impl PixelAssessment {
    /// Assess one pixel from reflectance values
    ///
    /// # Arguments
    /// * `bands` - Blue, Green, Red, NIR, SWIR1 and SWIR2 reflectance
    pub fn from_bands(bands: [f32; 6]) -> Self {
        let [blue, green, red, nir, swir1, swir2] = bands;

        let indices = vec![
            (SpectralIndex::Ndvi, formulas::ndvi(nir, red)),
            (SpectralIndex::Savi, formulas::savi(nir, red, formulas::SAVI_L)),
            (SpectralIndex::Evi, formulas::evi(nir, red, blue)),
            (SpectralIndex::Ndmi, formulas::ndmi(nir, swir1)),
            (SpectralIndex::Nbr, formulas::nbr(nir, swir2)),
            (SpectralIndex::Bsi, formulas::bsi(swir1, red, nir, blue)),
        ];

        let ndvi = indices[0].1;
        let ndmi = indices[3].1;
        let bsi = indices[5].1;
        let redness = formulas::redness(red, nir);

        let score = score_pixel(ndvi, ndmi, bsi, redness);
        let components = (!is_no_data(score))
            .then(|| RiskComponents::from_inputs(ndvi, ndmi, bsi, redness));

        PixelAssessment {
            indices,
            greenness: formulas::greenness(nir, red),
            redness,
            brightness: formulas::brightness(red, green, blue),
            components,
            score,
            class: RiskClass::from_score(score),
        }
    }

    pub fn index(&self, index: SpectralIndex) -> Option<f32> {
        self.indices.iter().find(|(i, _)| *i == index).map(|(_, v)| *v)
    }
}

impl fmt::Display for PixelAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = |v: f32| if is_no_data(v) { "no data".to_string() } else { format!("{:.4}", v) };

        for (index, v) in &self.indices {
            writeln!(f, "{:12}: {}", index.name(), value(*v))?;
        }
        writeln!(f, "{:12}: {}", "Greenness", value(self.greenness))?;
        writeln!(f, "{:12}: {}", "Redness", value(self.redness))?;
        writeln!(f, "{:12}: {}", "Brightness", value(self.brightness))?;

        if let Some(c) = &self.components {
            writeln!(f, "Components  : vegetation {:.1}, moisture {:.1}, soil {:.1}, stress {:.1}",
                     c.vegetation, c.moisture, c.soil, c.stress)?;
        }

        match self.class {
            Some(class) => writeln!(f, "Fire risk   : {:.2}/100 ({})", self.score, class),
            None => writeln!(f, "Fire risk   : no data"),
        }
    }
}

/// Runs the analysis pipeline, recording each run in a borrowed logger
pub struct Analyzer<'a> {
    logger: &'a Logger,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer
    ///
    /// # Arguments
    /// * `logger` - Logger for recording operations
    pub fn new(logger: &'a Logger) -> Self {
        Analyzer { logger }
    }

    /// Fetch a composite and run the full analysis on it
    ///
    /// # Arguments
    /// * `provider` - Source of imagery
    /// * `request` - Area, dates, satellite and cloud limit
    ///
    /// # Returns
    /// All computed layers and the statistics report
    pub fn analyze(&self, provider: &dyn ImageryProvider, request: &CompositeRequest) -> RiskResult<AnalysisResult> {
        self.logger.log(&format!(
            "Fetching {} composite from {} for {}",
            request.satellite, provider.name(), request.dates
        ))?;

        let image = provider.fetch_composite(request)?;
        let mut result = self.analyze_image(image)?;

        result.report.context = Some(ReportContext {
            satellite: request.satellite.to_string(),
            area: request.aoi.to_string(),
            dates: request.dates.to_string(),
            width: result.image.width(),
            height: result.image.height(),
            pixel_size_m: result.image.pixel_size_m(),
        });

        Ok(result)
    }

    /// Compute indices, plant colour, risk score and classes for an image
    pub fn analyze_image(&self, image: BandImage) -> RiskResult<AnalysisResult> {
        info!("Analyzing {}x{} composite", image.width(), image.height());

        let calculator = IndexCalculator::new(&image);
        let indices = calculator.compute_all()?;
        let color = calculator.plant_color()?;
        let scores = RiskScorer::score_layers(&indices, &color)?;
        let classes = classify(&scores);

        let report = AnalysisReport::from_layers(&indices, &color, &scores, &classes, image.pixel_area_km2());
        match report.mean_score() {
            Some(mean) => self.logger.log(&format!("Mean fire risk score: {:.2}", mean))?,
            None => self.logger.log("No pixel could be scored")?,
        }

        Ok(AnalysisResult {
            image,
            indices,
            color,
            scores,
            classes,
            report,
        })
    }

    /// Write every layer of a result to a directory
    ///
    /// # Returns
    /// Paths of the written files
    pub fn export(&self, result: &AnalysisResult, dir: &Path, format: ArrayFormat) -> RiskResult<Vec<PathBuf>> {
        let layers = result.layers();
        let named: Vec<(&str, &Grid<f32>)> = layers.iter().map(|(n, g)| (n.as_str(), g)).collect();

        let written = export_layers(dir, format, &named)?;
        self.logger.log(&format!("Exported {} layers to {}", written.len(), dir.display()))?;
        Ok(written)
    }
}

/// Main interface to the vegrisk library
pub struct VegRisk {
    logger: Logger,
}

impl VegRisk {
    /// Create a new VegRisk instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "vegrisk.log"
    ///
    /// # Returns
    /// A VegRisk instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&Path>) -> RiskResult<Self> {
        let log_path = log_file.unwrap_or_else(|| Path::new("vegrisk.log"));
        let logger = Logger::new(log_path)?;
        Ok(VegRisk { logger })
    }

    fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.logger)
    }

    /// Run a full analysis over a local scene archive
    ///
    /// # Arguments
    /// * `archive` - Directory holding `catalog.toml` and band files
    /// * `request` - Area, dates, satellite and cloud limit
    pub fn analyze_archive(&self, archive: &Path, request: &CompositeRequest) -> RiskResult<AnalysisResult> {
        let provider = LocalArchiveProvider::open(archive)?;
        self.analyzer().analyze(&provider, request)
    }

    /// Run a full analysis with any imagery provider
    pub fn analyze(&self, provider: &dyn ImageryProvider, request: &CompositeRequest) -> RiskResult<AnalysisResult> {
        self.analyzer().analyze(provider, request)
    }

    /// Analyze an image that is already in memory
    pub fn analyze_image(&self, image: BandImage) -> RiskResult<AnalysisResult> {
        self.analyzer().analyze_image(image)
    }

    /// Write every layer of a result to a directory
    pub fn export(&self, result: &AnalysisResult, dir: &Path, format: ArrayFormat) -> RiskResult<Vec<PathBuf>> {
        self.analyzer().export(result, dir, format)
    }

    /// Index values and risk for a single pixel
    pub fn assess_pixel(&self, bands: [f32; 6]) -> PixelAssessment {
        PixelAssessment::from_bands(bands)
    }
}
