//! Writing analysis layers to disk

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::raster::array_io::{save_grid, ArrayFormat};
use crate::raster::errors::RiskResult;
use crate::raster::grid::Grid;

/// Write each named layer to `<dir>/<name>.<ext>`
///
/// # Arguments
/// * `dir` - Output directory, created if missing
/// * `format` - Array format for every file
/// * `layers` - Layer names and grids
///
/// # Returns
/// Paths of the files written, in input order
pub fn export_layers<P: AsRef<Path>>(
    dir: P,
    format: ArrayFormat,
    layers: &[(&str, &Grid<f32>)],
) -> RiskResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(layers.len());
    for (name, grid) in layers {
        let path = dir.join(format!("{}.{}", name, format.extension()));
        save_grid(grid, &path, format)?;
        written.push(path);
    }

    info!("Exported {} layers to {}", written.len(), dir.display());
    Ok(written)
}
