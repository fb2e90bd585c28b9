//! Analysis configuration
//!
//! Settings come from an optional TOML file and from command-line flags.
//! Both are parsed into an [`AnalysisConfig`]; [`AnalysisConfig::overlay`]
//! lets the command line win over the file.
//!
//! ```toml
//! [area]
//! point = [-118.61, 34.09]
//! buffer_km = 2.0
//!
//! [dates]
//! start = "2024-06-01"
//! end = "2024-09-01"
//!
//! [imagery]
//! satellite = "sentinel2"
//! archive = "/data/archive"
//! max_cloud_percent = 20.0
//!
//! [output]
//! dir = "layers"
//! array_format = "npy"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};
use serde::Deserialize;

use crate::coordinate::{AreaOfInterest, BoundingBox, Point};
use crate::raster::array_io::ArrayFormat;
use crate::raster::errors::{RiskError, RiskResult};
use crate::source::request::{
    parse_date, CompositeRequest, DateRange, DEFAULT_MAX_CLOUD_PERCENT, DEFAULT_MAX_PIXELS,
};
use crate::source::Satellite;

/// Buffer radius used with a point when none is given
pub const DEFAULT_BUFFER_KM: f64 = 5.0;

/// Length of the default acquisition window ending today
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Area of interest settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AreaConfig {
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub bbox: Option<[f64; 4]>,
    /// `[lon, lat]`
    pub point: Option<[f64; 2]>,
    /// Radius around `point`
    pub buffer_km: Option<f64>,
}

/// Acquisition window settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatesConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Imagery source settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageryConfig {
    pub satellite: Option<Satellite>,
    /// Local scene archive directory
    pub archive: Option<PathBuf>,
    pub max_cloud_percent: Option<f64>,
    pub max_pixels: Option<u64>,
}

/// Layer export settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// Directory layers are exported to; no export when unset
    pub dir: Option<PathBuf>,
    pub array_format: Option<String>,
}

/// Everything an analysis run can be configured with
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub area: AreaConfig,
    #[serde(default)]
    pub dates: DatesConfig,
    #[serde(default)]
    pub imagery: ImageryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AnalysisConfig {
    /// Load a configuration file
    ///
    /// # Arguments
    /// * `path` - Path to a TOML file
    ///
    /// # Returns
    /// The parsed configuration or a `ConfigError`
    pub fn load<P: AsRef<Path>>(path: P) -> RiskResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            RiskError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> RiskResult<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        debug!("Parsed configuration: {:?}", config);
        Ok(config)
    }

    /// Combine with higher-priority settings; any value set in `other` wins
    ///
    /// Setting either `bbox` or `point` in `other` replaces the whole area,
    /// so a command-line point is not shadowed by a bounding box from file.
    pub fn overlay(self, other: AnalysisConfig) -> AnalysisConfig {
        let area = if other.area.bbox.is_some() || other.area.point.is_some() {
            other.area
        } else {
            AreaConfig {
                buffer_km: other.area.buffer_km.or(self.area.buffer_km),
                ..self.area
            }
        };

        AnalysisConfig {
            area,
            dates: DatesConfig {
                start: other.dates.start.or(self.dates.start),
                end: other.dates.end.or(self.dates.end),
            },
            imagery: ImageryConfig {
                satellite: other.imagery.satellite.or(self.imagery.satellite),
                archive: other.imagery.archive.or(self.imagery.archive),
                max_cloud_percent: other.imagery.max_cloud_percent.or(self.imagery.max_cloud_percent),
                max_pixels: other.imagery.max_pixels.or(self.imagery.max_pixels),
            },
            output: OutputConfig {
                dir: other.output.dir.or(self.output.dir),
                array_format: other.output.array_format.or(self.output.array_format),
            },
        }
    }

    /// Resolve the area of interest
    ///
    /// # Returns
    /// The area, or an error if neither or both of `bbox` and `point` are set
    pub fn area_of_interest(&self) -> RiskResult<AreaOfInterest> {
        match (self.area.bbox, self.area.point) {
            (Some(bbox), None) => Ok(AreaOfInterest::Bounds(BoundingBox::from_array(bbox)?)),
            (None, Some([lon, lat])) => {
                let radius_km = self.area.buffer_km.unwrap_or(DEFAULT_BUFFER_KM);
                if !radius_km.is_finite() || radius_km <= 0.0 {
                    return Err(RiskError::ConfigError(format!(
                        "buffer_km must be a positive number, got {}", radius_km
                    )));
                }
                Ok(AreaOfInterest::buffered_point(Point::try_new(lon, lat)?, radius_km))
            }
            (Some(_), Some(_)) => Err(RiskError::ConfigError(
                "Give either a bounding box or a point, not both".to_string(),
            )),
            (None, None) => Err(RiskError::ConfigError(
                "No area of interest: set a bounding box or a point".to_string(),
            )),
        }
    }

    /// Resolve the acquisition window
    ///
    /// A missing end means today; a missing start means 90 days before the end.
    pub fn date_range(&self) -> RiskResult<DateRange> {
        match (&self.dates.start, &self.dates.end) {
            (Some(start), Some(end)) => DateRange::parse(start, end),
            (Some(start), None) => DateRange::new(parse_date(start)?, Local::now().date_naive()),
            (None, Some(end)) => DateRange::ending_at(parse_date(end)?, DEFAULT_WINDOW_DAYS),
            (None, None) => DateRange::last_days(DEFAULT_WINDOW_DAYS),
        }
    }

    pub fn satellite(&self) -> Satellite {
        self.imagery.satellite.unwrap_or(Satellite::Sentinel2)
    }

    /// Archive directory, required for any run that reads imagery
    pub fn archive(&self) -> RiskResult<&Path> {
        self.imagery
            .archive
            .as_deref()
            .ok_or_else(|| RiskError::ConfigError("No imagery archive directory given".to_string()))
    }

    pub fn array_format(&self) -> RiskResult<ArrayFormat> {
        match &self.output.array_format {
            Some(s) => s.parse(),
            None => Ok(ArrayFormat::Csv),
        }
    }

    /// Build the composite request described by this configuration
    pub fn composite_request(&self) -> RiskResult<CompositeRequest> {
        let max_cloud = self.imagery.max_cloud_percent.unwrap_or(DEFAULT_MAX_CLOUD_PERCENT);
        if !(0.0..=100.0).contains(&max_cloud) {
            return Err(RiskError::ConfigError(format!(
                "max_cloud_percent must be between 0 and 100, got {}", max_cloud
            )));
        }

        Ok(CompositeRequest::new(self.area_of_interest()?, self.date_range()?, self.satellite())
            .with_max_cloud_percent(max_cloud)
            .with_max_pixels(self.imagery.max_pixels.unwrap_or(DEFAULT_MAX_PIXELS)))
    }
}
