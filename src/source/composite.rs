//! Median compositing across scenes

use crate::raster::errors::{RiskError, RiskResult};
use crate::raster::grid::{is_no_data, Grid, NO_DATA};

/// Median of the defined values, or no-data if there are none
///
/// An even count yields the mean of the two middle values.
pub fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return NO_DATA;
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Per-pixel median of aligned grids, ignoring no-data values
///
/// # Returns
/// The composite grid, or an error if the input is empty or sizes differ
pub fn median_composite(grids: &[&Grid<f32>]) -> RiskResult<Grid<f32>> {
    let Some(first) = grids.first() else {
        return Err(RiskError::GenericError("Cannot composite zero scenes".to_string()));
    };

    for grid in grids.iter().skip(1) {
        first.check_same_size(grid)?;
    }

    if grids.len() == 1 {
        return Ok((*first).clone());
    }

    let mut stack: Vec<f32> = Vec::with_capacity(grids.len());
    let data = (0..first.len())
        .map(|idx| {
            stack.clear();
            stack.extend(
                grids
                    .iter()
                    .map(|g| g.values()[idx])
                    .filter(|v| !is_no_data(*v)),
            );
            median(&mut stack)
        })
        .collect();

    Grid::from_vec(first.width(), first.height(), data)
}
