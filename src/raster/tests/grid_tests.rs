//! Tests for pixel grids

use crate::raster::grid::{is_no_data, Grid, NO_DATA};
use crate::raster::errors::RiskError;

#[test]
fn test_from_vec_rejects_wrong_length() {
    let result = Grid::from_vec(3, 2, vec![0.0f32; 5]);
    assert!(result.is_err());
}

#[test]
fn test_get_is_row_major() {
    let grid = Grid::from_vec(3, 2, vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(grid.get(0, 0), Some(1.0));
    assert_eq!(grid.get(2, 0), Some(3.0));
    assert_eq!(grid.get(0, 1), Some(4.0));
    assert_eq!(grid.get(3, 0), None);
    assert_eq!(grid.get(0, 2), None);
}

#[test]
fn test_valid_values_skip_no_data() {
    let grid = Grid::from_vec(2, 2, vec![1.0f32, NO_DATA, 3.0, NO_DATA]).unwrap();
    assert_eq!(grid.valid_count(), 2);
    assert_eq!(grid.valid_values().collect::<Vec<_>>(), vec![1.0, 3.0]);
    assert!(is_no_data(grid.get(1, 0).unwrap()));
}

#[test]
fn test_window_is_clipped() {
    let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
    let grid = Grid::from_vec(4, 4, data).unwrap();

    let window = grid.window(1, 1, 2, 2);
    assert_eq!(window.dimensions(), (2, 2));
    assert_eq!(window.values(), &[5.0, 6.0, 9.0, 10.0]);

    let clipped = grid.window(3, 2, 5, 5);
    assert_eq!(clipped.dimensions(), (1, 2));
    assert_eq!(clipped.values(), &[11.0, 15.0]);
}

#[test]
fn test_size_mismatch_error() {
    let a = Grid::filled(2, 2, 0.0f32);
    let b = Grid::filled(3, 2, 0.0f32);
    match a.check_same_size(&b) {
        Err(RiskError::DimensionMismatch { expected, found }) => {
            assert_eq!(expected, (2, 2));
            assert_eq!(found, (3, 2));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
