//! Tests for nearest-neighbour resampling

use crate::raster::grid::{is_no_data, Grid};
use crate::raster::resample::{resample_nearest, source_pixel};

const FINE: [f64; 6] = [0.0, 0.001, 0.0, 0.002, 0.0, -0.001];

#[test]
fn test_source_pixel_lookup() {
    assert_eq!(source_pixel(&FINE, 2, 2, 0.0005, 0.0015), Some((0, 0)));
    assert_eq!(source_pixel(&FINE, 2, 2, 0.0015, 0.0005), Some((1, 1)));
    assert_eq!(source_pixel(&FINE, 2, 2, 0.0025, 0.0005), None);
    assert_eq!(source_pixel(&FINE, 2, 2, 0.0005, -0.0005), None);
}

#[test]
fn test_coarse_band_fills_every_fine_pixel() {
    // One 2 mdeg pixel over the same extent as a 2x2 fine grid
    let coarse = Grid::from_vec(1, 1, vec![0.25]).unwrap();
    let coarse_gt = [0.0, 0.002, 0.0, 0.002, 0.0, -0.002];

    let out = resample_nearest(&coarse, &coarse_gt, &FINE, 2, 2).unwrap();
    assert_eq!(out.dimensions(), (2, 2));
    assert!(out.values().iter().all(|v| *v == 0.25));
}

#[test]
fn test_target_outside_footprint_is_no_data() {
    let source = Grid::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    // Target lattice shifted one pixel east
    let target = [0.001, 0.001, 0.0, 0.002, 0.0, -0.001];

    let out = resample_nearest(&source, &FINE, &target, 2, 2).unwrap();
    assert_eq!(out.get(0, 0), Some(2.0));
    assert_eq!(out.get(0, 1), Some(4.0));
    assert!(is_no_data(out.get(1, 0).unwrap()));
    assert!(is_no_data(out.get(1, 1).unwrap()));
}
