//! Nearest-neighbour resampling between north-up pixel grids
//!
//! Geotransforms follow the usual six-coefficient layout:
//! `[origin_x, pixel_width, 0, origin_y, 0, pixel_height]` with a negative
//! pixel height for north-up images.

use super::errors::RiskResult;
use super::grid::{Grid, NO_DATA};

/// Column and row of the source pixel containing a geographic position
///
/// # Returns
/// The pixel, or None when the position lies outside the grid
pub fn source_pixel(geotransform: &[f64; 6], width: u32, height: u32, x: f64, y: f64) -> Option<(u32, u32)> {
    let col = ((x - geotransform[0]) / geotransform[1]).floor();
    let row = ((y - geotransform[3]) / geotransform[5]).floor();

    if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
        return None;
    }
    Some((col as u32, row as u32))
}

/// Sample a grid onto another pixel lattice
///
/// Each target pixel takes the value of the source pixel under its
/// center. Target pixels outside the source footprint are no-data.
///
/// # Arguments
/// * `source` - Grid to sample
/// * `source_gt` - Geotransform of `source`
/// * `target_gt` - Geotransform of the output lattice
/// * `width` - Output width in pixels
/// * `height` - Output height in pixels
pub fn resample_nearest(
    source: &Grid<f32>,
    source_gt: &[f64; 6],
    target_gt: &[f64; 6],
    width: u32,
    height: u32,
) -> RiskResult<Grid<f32>> {
    let mut data = Vec::with_capacity(width as usize * height as usize);

    for row in 0..height {
        let y = target_gt[3] + (row as f64 + 0.5) * target_gt[5];
        for col in 0..width {
            let x = target_gt[0] + (col as f64 + 0.5) * target_gt[1];
            let value = source_pixel(source_gt, source.width(), source.height(), x, y)
                .and_then(|(sx, sy)| source.get(sx, sy))
                .unwrap_or(NO_DATA);
            data.push(value);
        }
    }

    Grid::from_vec(width, height, data)
}
