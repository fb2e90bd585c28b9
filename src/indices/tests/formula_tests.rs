//! Tests for per-pixel index formulas

use crate::indices::formulas::*;
use crate::raster::grid::{is_no_data, NO_DATA};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn test_ndvi_example() {
    assert!(approx(ndvi(0.40, 0.10), 0.60));
}

#[test]
fn test_zero_denominator_is_no_data() {
    assert!(is_no_data(ndvi(0.0, 0.0)));
    assert!(is_no_data(ndmi(0.0, 0.0)));
    assert!(is_no_data(nbr(0.0, 0.0)));
    assert!(is_no_data(bsi(0.0, 0.0, 0.0, 0.0)));
    // NIR + 6*Red - 7.5*Blue + 1 = 0
    assert!(is_no_data(evi(0.5, 0.0, 0.2)));
    assert!(is_no_data(redness(0.1, -REDNESS_EPSILON)));
}

#[test]
fn test_no_data_input_propagates() {
    assert!(is_no_data(ndvi(NO_DATA, 0.1)));
    assert!(is_no_data(savi(0.4, NO_DATA, SAVI_L)));
    assert!(is_no_data(evi(0.4, 0.1, NO_DATA)));
    assert!(is_no_data(bsi(0.2, 0.1, NO_DATA, 0.05)));
    assert!(is_no_data(greenness(NO_DATA, 0.1)));
    assert!(is_no_data(brightness(0.1, NO_DATA, 0.1)));
}

#[test]
fn test_savi_matches_formula() {
    let expected = ((0.4 - 0.1) / (0.4 + 0.1 + 0.5)) * 1.5;
    assert!(approx(savi(0.4, 0.1, SAVI_L), expected));
}

#[test]
fn test_evi_matches_formula() {
    let expected = 2.5 * (0.4 - 0.1) / (0.4 + 6.0 * 0.1 - 7.5 * 0.05 + 1.0);
    assert!(approx(evi(0.4, 0.1, 0.05), expected));
}

#[test]
fn test_bsi_matches_formula() {
    let expected = ((0.3 + 0.2) - (0.25 + 0.05)) / ((0.3 + 0.2) + (0.25 + 0.05));
    assert!(approx(bsi(0.3, 0.2, 0.25, 0.05), expected));
}

#[test]
fn test_plant_color() {
    assert!(approx(greenness(0.4, 0.1), 0.3));
    assert!(approx(redness(0.1, 0.4), 0.1 / 0.4001));
    assert!(approx(brightness(0.3, 0.2, 0.1), 0.2));
}

#[test]
fn test_normalized_indices_bounded_over_reflectance_grid() {
    let steps: Vec<f32> = (0..=10).map(|i| i as f32 / 10.0).collect();

    for &a in &steps {
        for &b in &steps {
            for value in [ndvi(a, b), ndmi(a, b), nbr(a, b)] {
                if !is_no_data(value) {
                    assert!((-1.0..=1.0).contains(&value), "{} out of range for {},{}", value, a, b);
                }
            }

            let s = savi(a, b, SAVI_L);
            assert!((-1.5..=1.5).contains(&s));

            for &c in &steps {
                let value = bsi(a, b, c, 0.5 * (a + c));
                if !is_no_data(value) {
                    assert!((-1.0..=1.0).contains(&value));
                }
            }
        }
    }
}
