//! Scene catalog for a local imagery archive
//!
//! An archive directory holds a `catalog.toml` describing each scene:
//!
//! ```toml
//! [[scene]]
//! id = "S2B_20240615"
//! satellite = "sentinel2"
//! date = "2024-06-15"
//! cloud_cover = 4.2
//! bounds = [-118.62, 34.08, -118.60, 34.10]
//!
//! [scene.bands]
//! B2 = "S2B_20240615/B2.png"
//! B4 = "S2B_20240615/B4.png"
//! ```
//!
//! Band keys are native band names for the scene's satellite. Paths are
//! relative to the archive directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use serde::Deserialize;

use crate::coordinate::BoundingBox;
use crate::raster::errors::{RiskError, RiskResult};

use super::request::{parse_date, CompositeRequest};
use super::satellite::Satellite;

/// File name of the catalog inside an archive directory
pub const CATALOG_FILE: &str = "catalog.toml";

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default, rename = "scene")]
    scenes: Vec<RawScene>,
}

#[derive(Debug, Deserialize)]
struct RawScene {
    id: String,
    satellite: Satellite,
    date: String,
    cloud_cover: f64,
    bounds: [f64; 4],
    #[serde(default)]
    pixel_size_m: Option<f64>,
    #[serde(default)]
    reflectance: bool,
    bands: BTreeMap<String, PathBuf>,
}

/// One acquisition in the archive
#[derive(Debug, Clone)]
pub struct SceneEntry {
    /// Scene identifier
    pub id: String,
    /// Mission that acquired the scene
    pub satellite: Satellite,
    /// Acquisition date
    pub date: NaiveDate,
    /// Cloud cover in percent
    pub cloud_cover: f64,
    /// Geographic extent of the band files
    pub bounds: BoundingBox,
    /// Pixel edge length; the satellite's native resolution when absent
    pub pixel_size_m: Option<f64>,
    /// Band values are already surface reflectance
    pub reflectance: bool,
    /// Native band name to file path (resolved against the archive root)
    pub bands: BTreeMap<String, PathBuf>,
}

/// All scenes known to an archive
#[derive(Debug, Clone, Default)]
pub struct SceneCatalog {
    scenes: Vec<SceneEntry>,
}

impl SceneCatalog {
    /// Load `catalog.toml` from an archive directory
    pub fn load<P: AsRef<Path>>(root: P) -> RiskResult<Self> {
        let root = root.as_ref();
        let path = root.join(CATALOG_FILE);
        info!("Loading scene catalog from {}", path.display());

        let content = fs::read_to_string(&path).map_err(|e| {
            RiskError::FetchError(format!("Cannot read catalog {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content, root)
    }

    /// Parse catalog text, resolving band paths against `root`
    pub fn from_toml(content: &str, root: &Path) -> RiskResult<Self> {
        let raw: RawCatalog = toml::from_str(content)?;

        let scenes = raw
            .scenes
            .into_iter()
            .map(|scene| {
                let bounds = BoundingBox::from_array(scene.bounds)?;
                let date = parse_date(&scene.date)?;
                let bands = scene
                    .bands
                    .into_iter()
                    .map(|(name, path)| (name, root.join(path)))
                    .collect();

                Ok(SceneEntry {
                    id: scene.id,
                    satellite: scene.satellite,
                    date,
                    cloud_cover: scene.cloud_cover,
                    bounds,
                    pixel_size_m: scene.pixel_size_m,
                    reflectance: scene.reflectance,
                    bands,
                })
            })
            .collect::<RiskResult<Vec<_>>>()?;

        debug!("Catalog holds {} scenes", scenes.len());
        Ok(SceneCatalog { scenes })
    }

    /// Create a catalog from already-built entries
    pub fn from_entries(scenes: Vec<SceneEntry>) -> Self {
        SceneCatalog { scenes }
    }

    pub fn scenes(&self) -> &[SceneEntry] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes matching the request's satellite, dates, cloud limit and area
    ///
    /// Results are ordered by acquisition date.
    pub fn select(&self, request: &CompositeRequest) -> Vec<&SceneEntry> {
        let aoi_bounds = request.aoi.bounding_box();

        let mut selected: Vec<&SceneEntry> = self
            .scenes
            .iter()
            .filter(|s| s.satellite == request.satellite)
            .filter(|s| request.dates.contains(s.date))
            .filter(|s| s.cloud_cover < request.max_cloud_percent)
            .filter(|s| s.bounds.intersects(&aoi_bounds))
            .collect();

        selected.sort_by_key(|s| s.date);
        selected
    }
}
