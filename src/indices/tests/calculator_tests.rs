//! Tests for whole-image index computation

use std::collections::BTreeMap;

use crate::coordinate::BoundingBox;
use crate::indices::{combine, IndexCalculator, SpectralIndex};
use crate::raster::band::Band;
use crate::raster::band_image::BandImage;
use crate::raster::errors::RiskError;
use crate::raster::grid::{is_no_data, Grid};
use crate::source::Satellite;

use super::test_utils::image_from_pixels;

#[test]
fn test_compute_ndvi_layer() {
    let image = image_from_pixels(&[
        [0.05, 0.08, 0.10, 0.40, 0.20, 0.10],
        [0.05, 0.08, 0.00, 0.00, 0.20, 0.10],
    ]);

    let layer = IndexCalculator::new(&image).compute(SpectralIndex::Ndvi).unwrap();
    assert_eq!(layer.index, SpectralIndex::Ndvi);
    assert!((layer.grid.get(0, 0).unwrap() - 0.6).abs() < 1e-5);
    assert!(is_no_data(layer.grid.get(1, 0).unwrap()));
    assert_eq!(layer.grid.valid_count(), 1);
}

#[test]
fn test_compute_all_produces_every_index() {
    let image = image_from_pixels(&[[0.05, 0.08, 0.10, 0.40, 0.20, 0.10]]);
    let set = IndexCalculator::new(&image).compute_all().unwrap();

    assert_eq!(set.len(), SpectralIndex::ALL.len());
    for index in SpectralIndex::ALL {
        let grid = set.grid(index).unwrap();
        assert_eq!(grid.dimensions(), (1, 1));
        let value = grid.get(0, 0).unwrap();
        if let Some((lo, hi)) = index.value_range() {
            assert!(value >= lo && value <= hi, "{} = {}", index, value);
        }
    }
}

#[test]
fn test_missing_band_is_reported() {
    let mut bands = BTreeMap::new();
    bands.insert(Band::Red, Grid::filled(2, 2, 0.1f32));
    bands.insert(Band::Nir, Grid::filled(2, 2, 0.4f32));
    let image = BandImage::new(
        Satellite::Landsat8,
        BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        30.0,
        bands,
    )
    .unwrap();

    let calc = IndexCalculator::new(&image);
    assert!(calc.compute(SpectralIndex::Ndvi).is_ok());
    match calc.compute(SpectralIndex::Ndmi) {
        Err(RiskError::MissingBand(Band::Swir1)) => {}
        other => panic!("expected missing SWIR1, got {:?}", other.map(|l| l.index)),
    }
    assert!(calc.plant_color().is_err());
}

#[test]
fn test_plant_color_layers() {
    let image = image_from_pixels(&[[0.10, 0.20, 0.30, 0.50, 0.20, 0.10]]);
    let color = IndexCalculator::new(&image).plant_color().unwrap();

    assert!((color.greenness.get(0, 0).unwrap() - 0.2).abs() < 1e-5);
    assert!((color.redness.get(0, 0).unwrap() - 0.3 / 0.5001).abs() < 1e-5);
    assert!((color.brightness.get(0, 0).unwrap() - 0.2).abs() < 1e-5);
}

#[test]
fn test_combine_rejects_misaligned_grids() {
    let a = Grid::filled(2, 2, 1.0f32);
    let b = Grid::filled(2, 3, 1.0f32);
    assert!(combine(&[&a, &b], |v| v[0] + v[1]).is_err());
}

#[test]
fn test_index_names_parse() {
    assert_eq!("ndmi".parse::<SpectralIndex>().unwrap(), SpectralIndex::Ndmi);
    assert_eq!(SpectralIndex::Bsi.to_string(), "BSI");
    assert!("ndwi".parse::<SpectralIndex>().is_err());
}
