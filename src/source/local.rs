//! Imagery provider backed by a local scene archive
//!
//! Performs the same steps the remote imagery service does for a
//! composite request: filter scenes by date, area and cloud cover, convert
//! stored values to reflectance, resample every band onto one output grid
//! over the area of interest and take the per-pixel median.
//!
//! The output grid uses the pixel lattice of the finest band among the
//! selected scenes and spans the part of the area of interest that at
//! least one scene covers. Pixels a scene does not cover are no-data for
//! that scene, so each output pixel is a median over the scenes under it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, info, warn};

use crate::coordinate::{AreaOfInterest, BoundingBox, PixelRegion};
use crate::raster::array_io::load_csv;
use crate::raster::band::Band;
use crate::raster::band_image::BandImage;
use crate::raster::errors::{RiskError, RiskResult};
use crate::raster::grid::{is_no_data, Grid, NO_DATA};
use crate::raster::resample::resample_nearest;
use crate::utils::progress::ProgressTracker;

use super::catalog::{SceneCatalog, SceneEntry};
use super::composite::median_composite;
use super::provider::ImageryProvider;
use super::request::CompositeRequest;
use super::satellite::SatelliteDefinition;

/// One band of a scene in reflectance, on the scene's own pixel grid
#[derive(Debug)]
struct SceneBand {
    grid: Grid<f32>,
    geotransform: [f64; 6],
}

/// All bands of one scene after scaling
#[derive(Debug)]
struct LoadedScene {
    id: String,
    bounds: BoundingBox,
    pixel_size_m: f64,
    bands: BTreeMap<Band, SceneBand>,
}

impl LoadedScene {
    /// Band with the smallest pixel width
    fn finest_band(&self) -> Option<&SceneBand> {
        self.bands
            .values()
            .min_by(|a, b| a.geotransform[1].abs().total_cmp(&b.geotransform[1].abs()))
    }
}

/// Pixel lattice every scene is resampled onto
#[derive(Debug, Clone, Copy)]
struct OutputGrid {
    bounds: BoundingBox,
    region: PixelRegion,
    pixel_size_m: f64,
}

impl OutputGrid {
    fn geotransform(&self) -> [f64; 6] {
        self.bounds.geotransform(self.region.width, self.region.height)
    }

    fn pixels(&self) -> u64 {
        self.region.width as u64 * self.region.height as u64
    }
}

/// Provider reading scenes listed in an archive's `catalog.toml`
pub struct LocalArchiveProvider {
    root: PathBuf,
    catalog: SceneCatalog,
    show_progress: bool,
}

impl LocalArchiveProvider {
    /// Open an archive directory
    ///
    /// # Arguments
    /// * `root` - Directory containing `catalog.toml` and the band files
    ///
    /// # Returns
    /// The provider, or an error if the catalog cannot be read
    pub fn open<P: AsRef<Path>>(root: P) -> RiskResult<Self> {
        let root = root.as_ref().to_path_buf();
        let catalog = SceneCatalog::load(&root)?;
        info!("Opened archive {} with {} scenes", root.display(), catalog.len());

        Ok(LocalArchiveProvider {
            root,
            catalog,
            show_progress: false,
        })
    }

    /// Create a provider over an in-memory catalog
    pub fn with_catalog<P: AsRef<Path>>(root: P, catalog: SceneCatalog) -> Self {
        LocalArchiveProvider {
            root: root.as_ref().to_path_buf(),
            catalog,
            show_progress: false,
        }
    }

    /// Show a terminal progress bar while scenes load
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Load and scale the bands of one scene
    fn load_scene(&self, scene: &SceneEntry, definition: &SatelliteDefinition) -> RiskResult<LoadedScene> {
        debug!("Loading scene {} ({}, {:.1}% cloud)", scene.id, scene.date, scene.cloud_cover);

        let mut bands = BTreeMap::new();
        for (native_name, path) in &scene.bands {
            let Some(band) = definition.canonical_band(native_name) else {
                debug!("Ignoring band {} of scene {}: not used by any index", native_name, scene.id);
                continue;
            };

            let raw = load_band_file(path)?;
            let (width, height) = raw.dimensions();
            if raw.is_empty() {
                return Err(RiskError::FetchError(format!(
                    "Band file {} of scene {} is empty", path.display(), scene.id
                )));
            }

            let grid = if scene.reflectance {
                raw
            } else {
                raw.map(|dn| scale_digital_number(dn, definition))
            };

            debug!("Scene {} band {} is {}x{}", scene.id, band, width, height);
            bands.insert(band, SceneBand {
                grid,
                geotransform: scene.bounds.geotransform(width, height),
            });
        }

        if bands.is_empty() {
            return Err(RiskError::FetchError(format!("Scene {} has no usable bands", scene.id)));
        }

        Ok(LoadedScene {
            id: scene.id.clone(),
            bounds: scene.bounds,
            pixel_size_m: scene.pixel_size_m.unwrap_or(definition.native_resolution_m),
            bands,
        })
    }
}

/// Lay out the output grid for a set of loaded scenes
///
/// The grid covers the part of the area of interest inside the union of
/// the scene footprints, snapped onto the finest band's pixel lattice.
fn output_grid(scenes: &[LoadedScene], aoi: &AreaOfInterest) -> RiskResult<OutputGrid> {
    let mut reference: Option<(&LoadedScene, &SceneBand)> = None;
    let mut footprint: Option<BoundingBox> = None;

    for scene in scenes {
        footprint = Some(match footprint {
            Some(f) => f.union(&scene.bounds),
            None => scene.bounds,
        });

        if let Some(band) = scene.finest_band() {
            let finer = reference
                .map(|(_, r)| band.geotransform[1].abs() < r.geotransform[1].abs())
                .unwrap_or(true);
            if finer {
                reference = Some((scene, band));
            }
        }
    }

    let (Some((reference_scene, reference_band)), Some(footprint)) = (reference, footprint) else {
        return Err(RiskError::GenericError("Cannot composite zero scenes".to_string()));
    };

    let Some(extent) = aoi.bounding_box().intersection(&footprint) else {
        return Err(RiskError::FetchError(
            "Selected scenes do not overlap the area of interest".to_string(),
        ));
    };

    let (bounds, region) = extent.align_to_grid(&reference_band.geotransform);
    if region.is_empty() {
        return Err(RiskError::FetchError(
            "Area of interest covers no whole pixel of the selected scenes".to_string(),
        ));
    }

    debug!("Output grid {}x{} on the lattice of scene {}",
           region.width, region.height, reference_scene.id);

    Ok(OutputGrid {
        bounds,
        region,
        pixel_size_m: reference_scene.pixel_size_m,
    })
}

impl ImageryProvider for LocalArchiveProvider {
    fn name(&self) -> &str {
        "local-archive"
    }

    fn fetch_composite(&self, request: &CompositeRequest) -> RiskResult<BandImage> {
        let definition = request.satellite.definition()?;
        let scenes = self.catalog.select(request);

        info!("Found {} {} images for {} over {} ({:.2} km²)",
              scenes.len(), definition.name, request.dates, request.aoi,
              request.aoi.bounding_box().area_km2());

        if scenes.is_empty() {
            return Err(RiskError::EmptyCollection {
                satellite: definition.name.clone(),
                start: request.dates.start().to_string(),
                end: request.dates.end().to_string(),
            });
        }

        let progress = self
            .show_progress
            .then(|| ProgressTracker::new(scenes.len() as u64, "Loading scenes"));

        let mut loaded = Vec::with_capacity(scenes.len());
        for scene in &scenes {
            if let Some(p) = &progress {
                p.set_message(&scene.id);
            }
            loaded.push(self.load_scene(scene, definition)?);
            if let Some(p) = &progress {
                p.increment(1);
            }
        }

        if let Some(p) = &progress {
            p.finish();
        }

        let grid = output_grid(&loaded, &request.aoi)?;
        if grid.pixels() > request.max_pixels {
            return Err(RiskError::AreaTooLarge {
                pixels: grid.pixels(),
                limit: request.max_pixels,
            });
        }

        for scene in &loaded {
            if (scene.pixel_size_m - grid.pixel_size_m).abs() > f64::EPSILON {
                warn!("Scene {} has {} m pixels, compositing at {} m",
                      scene.id, scene.pixel_size_m, grid.pixel_size_m);
            }
        }

        let target_gt = grid.geotransform();
        let (width, height) = (grid.region.width, grid.region.height);

        let mut bands = BTreeMap::new();
        for band in Band::ALL {
            let stack = loaded
                .iter()
                .filter_map(|s| s.bands.get(&band))
                .map(|b| resample_nearest(&b.grid, &b.geotransform, &target_gt, width, height))
                .collect::<RiskResult<Vec<Grid<f32>>>>()?;

            if stack.is_empty() {
                warn!("No scene provides the {} band", band);
                continue;
            }

            debug!("Compositing {} from {} scenes", band, stack.len());
            let refs: Vec<&Grid<f32>> = stack.iter().collect();
            let composite = median_composite(&refs)?;
            bands.insert(band, mask_outside(&composite, &request.aoi, &target_gt)?);
        }

        BandImage::new(request.satellite, grid.bounds, grid.pixel_size_m, bands)
    }
}

/// Convert a stored digital number to reflectance; zero is the fill value
fn scale_digital_number(dn: f32, definition: &SatelliteDefinition) -> f32 {
    if is_no_data(dn) || dn == 0.0 {
        NO_DATA
    } else {
        definition.to_reflectance(dn)
    }
}

/// Set pixels whose centers fall outside the area to no-data
fn mask_outside(grid: &Grid<f32>, aoi: &AreaOfInterest, geotransform: &[f64; 6]) -> RiskResult<Grid<f32>> {
    if matches!(aoi, AreaOfInterest::Bounds(_)) {
        return Ok(grid.clone());
    }

    let mut data = Vec::with_capacity(grid.len());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let center = BoundingBox::pixel_center(geotransform, x, y);
            let value = grid.get(x, y).unwrap_or(NO_DATA);
            data.push(if aoi.contains(&center) { value } else { NO_DATA });
        }
    }

    Grid::from_vec(grid.width(), grid.height(), data)
}

/// Read a single-band file into a float grid
///
/// CSV files are parsed as text grids. Other files are decoded with the
/// `image` crate and must be single-channel 8- or 16-bit images.
pub fn load_band_file<P: AsRef<Path>>(path: P) -> RiskResult<Grid<f32>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        return load_csv(path);
    }

    let image = image::open(path)
        .inspect_err(|e| warn!("Cannot decode band file {}: {}", path.display(), e))?;

    let (width, height) = (image.width(), image.height());
    let data: Vec<f32> = match image {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        other => {
            return Err(RiskError::FetchError(format!(
                "Band file {} must be a single-channel image, found {:?}",
                path.display(),
                other.color()
            )))
        }
    };

    Grid::from_vec(width, height, data)
}
