//! Tests for the local archive provider

use std::fs;

use crate::coordinate::{AreaOfInterest, BoundingBox, Point};
use crate::raster::band::Band;
use crate::raster::errors::RiskError;
use crate::raster::grid::is_no_data;
use crate::source::request::{CompositeRequest, DateRange};
use crate::source::tests::test_utils::{
    scene_toml, scene_toml_at, temp_archive, write_constant_band, write_scene,
};
use crate::source::{ImageryProvider, LocalArchiveProvider, Satellite};

fn request(aoi: AreaOfInterest) -> CompositeRequest {
    let dates = DateRange::parse("2024-06-01", "2024-09-01").unwrap();
    CompositeRequest::new(aoi, dates, Satellite::Sentinel2)
}

fn full_scene_aoi() -> AreaOfInterest {
    AreaOfInterest::Bounds(BoundingBox::new(0.0, 0.0, 0.002, 0.002))
}

#[test]
fn test_median_composite_from_archive() {
    let root = temp_archive("median");
    let catalog = [
        scene_toml("a", "2024-06-10", 2.0, true),
        scene_toml("b", "2024-07-10", 5.0, true),
        scene_toml("c", "2024-08-10", 8.0, true),
        scene_toml("cloudy", "2024-08-20", 60.0, true),
    ]
    .concat();
    fs::write(root.join("catalog.toml"), catalog).unwrap();
    write_scene(&root, "a", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);
    write_scene(&root, "b", [0.04, 0.06, 0.07, 0.40, 0.25, 0.15]);
    write_scene(&root, "c", [0.06, 0.08, 0.09, 0.50, 0.30, 0.20]);
    write_scene(&root, "cloudy", [0.9, 0.9, 0.9, 0.9, 0.9, 0.9]);

    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(full_scene_aoi())).unwrap();

    assert_eq!(image.satellite(), Satellite::Sentinel2);
    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.pixel_size_m(), 10.0);
    for band in Band::ALL {
        assert!(image.has_band(band));
    }
    let nir = image.band(Band::Nir).unwrap();
    assert!((nir.get(1, 1).unwrap() - 0.40).abs() < 1e-6);
    let swir2 = image.band(Band::Swir2).unwrap();
    assert!((swir2.get(0, 0).unwrap() - 0.15).abs() < 1e-6);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_digital_numbers_are_scaled() {
    let root = temp_archive("scaled");
    fs::write(root.join("catalog.toml"), scene_toml("dn", "2024-06-10", 2.0, false)).unwrap();
    write_scene(&root, "dn", [500.0, 800.0, 1000.0, 5000.0, 2500.0, 0.0]);

    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(full_scene_aoi())).unwrap();

    assert!((image.band(Band::Nir).unwrap().get(0, 0).unwrap() - 0.5).abs() < 1e-6);
    assert!((image.band(Band::Red).unwrap().get(0, 0).unwrap() - 0.1).abs() < 1e-6);
    // Zero is the fill value
    assert!(is_no_data(image.band(Band::Swir2).unwrap().get(0, 0).unwrap()));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_crop_to_area_of_interest() {
    let root = temp_archive("crop");
    fs::write(root.join("catalog.toml"), scene_toml("a", "2024-06-10", 2.0, true)).unwrap();
    write_scene(&root, "a", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);

    // Lower-left pixel only
    let aoi = AreaOfInterest::Bounds(BoundingBox::new(0.0002, 0.0002, 0.0008, 0.0008));
    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(aoi)).unwrap();

    assert_eq!((image.width(), image.height()), (1, 1));
    assert!((image.bounds().min_x - 0.0).abs() < 1e-12);
    assert!((image.bounds().max_y - 0.001).abs() < 1e-12);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_buffer_area_masks_outside_pixels() {
    let root = temp_archive("buffer");
    fs::write(root.join("catalog.toml"), scene_toml("a", "2024-06-10", 2.0, true)).unwrap();
    write_scene(&root, "a", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);

    // A 100 m circle around the lower-left pixel center: its bounding box
    // covers all four pixels but only one center lies inside the circle
    let aoi = AreaOfInterest::buffered_point(Point::new(0.0005, 0.0005), 0.1);
    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(aoi)).unwrap();
    let nir = image.band(Band::Nir).unwrap();

    assert_eq!(nir.dimensions(), (2, 2));
    assert_eq!(nir.valid_count(), 1);
    assert!((nir.get(0, 1).unwrap() - 0.30).abs() < 1e-6);
    assert!(is_no_data(nir.get(1, 0).unwrap()));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_empty_selection_is_an_error() {
    let root = temp_archive("empty");
    fs::write(root.join("catalog.toml"), scene_toml("old", "2023-01-10", 2.0, true)).unwrap();

    let provider = LocalArchiveProvider::open(&root).unwrap();
    match provider.fetch_composite(&request(full_scene_aoi())) {
        Err(RiskError::EmptyCollection { satellite, start, end }) => {
            assert_eq!(satellite, "Sentinel-2");
            assert_eq!(start, "2024-06-01");
            assert_eq!(end, "2024-09-01");
        }
        other => panic!("expected EmptyCollection, got {:?}", other.map(|_| ())),
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_pixel_limit() {
    let root = temp_archive("limit");
    fs::write(root.join("catalog.toml"), scene_toml("a", "2024-06-10", 2.0, true)).unwrap();
    write_scene(&root, "a", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);

    let provider = LocalArchiveProvider::open(&root).unwrap();
    let result = provider.fetch_composite(&request(full_scene_aoi()).with_max_pixels(3));
    assert!(matches!(result, Err(RiskError::AreaTooLarge { pixels: 4, limit: 3 })));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_offset_scenes_are_matched_by_location() {
    let root = temp_archive("offset");
    let catalog = [
        scene_toml_at("west", "2024-06-10", 2.0, true, [0.0, 0.0, 0.002, 0.002]),
        scene_toml_at("east", "2024-07-10", 2.0, true, [0.001, 0.0, 0.003, 0.002]),
    ]
    .concat();
    fs::write(root.join("catalog.toml"), catalog).unwrap();
    write_scene(&root, "west", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);
    write_scene(&root, "east", [0.02, 0.04, 0.05, 0.50, 0.20, 0.10]);

    let aoi = AreaOfInterest::Bounds(BoundingBox::new(0.0, 0.0, 0.003, 0.002));
    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(aoi)).unwrap();

    assert_eq!((image.width(), image.height()), (3, 2));
    assert!((image.bounds().min_x - 0.0).abs() < 1e-9);
    assert!((image.bounds().max_x - 0.003).abs() < 1e-9);

    let nir = image.band(Band::Nir).unwrap();
    for y in 0..2 {
        // Only the west scene covers the first column, only the east the last
        assert!((nir.get(0, y).unwrap() - 0.30).abs() < 1e-6);
        assert!((nir.get(1, y).unwrap() - 0.40).abs() < 1e-6);
        assert!((nir.get(2, y).unwrap() - 0.50).abs() < 1e-6);
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_disjoint_scenes_keep_their_own_pixels() {
    let root = temp_archive("disjoint");
    let catalog = [
        scene_toml_at("west", "2024-06-10", 2.0, true, [0.0, 0.0, 0.002, 0.002]),
        scene_toml_at("east", "2024-07-10", 2.0, true, [0.002, 0.0, 0.004, 0.002]),
    ]
    .concat();
    fs::write(root.join("catalog.toml"), catalog).unwrap();
    write_scene(&root, "west", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);
    write_scene(&root, "east", [0.02, 0.04, 0.05, 0.50, 0.20, 0.10]);

    let aoi = AreaOfInterest::Bounds(BoundingBox::new(0.0, 0.0, 0.004, 0.002));
    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(aoi)).unwrap();

    assert_eq!((image.width(), image.height()), (4, 2));
    assert!((image.bounds().max_x - 0.004).abs() < 1e-9);

    let nir = image.band(Band::Nir).unwrap();
    assert!((nir.get(1, 0).unwrap() - 0.30).abs() < 1e-6);
    assert!((nir.get(2, 0).unwrap() - 0.50).abs() < 1e-6);
    assert_eq!(nir.valid_count(), 8);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_coarse_swir_bands_are_resampled() {
    let root = temp_archive("swir20m");
    fs::write(root.join("catalog.toml"), scene_toml("a", "2024-06-10", 2.0, true)).unwrap();
    write_scene(&root, "a", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);
    // 20 m short-wave infrared files hold one pixel for every 2x2 at 10 m
    write_constant_band(&root.join("a").join("B11.csv"), 1, 0.22);
    write_constant_band(&root.join("a").join("B12.csv"), 1, 0.12);

    let provider = LocalArchiveProvider::open(&root).unwrap();
    let image = provider.fetch_composite(&request(full_scene_aoi())).unwrap();

    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.pixel_size_m(), 10.0);
    let swir1 = image.band(Band::Swir1).unwrap();
    assert_eq!(swir1.dimensions(), (2, 2));
    assert!(swir1.values().iter().all(|v| (v - 0.22).abs() < 1e-6));
    assert!((image.band(Band::Swir2).unwrap().get(1, 1).unwrap() - 0.12).abs() < 1e-6);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_undecodable_band_image() {
    let root = temp_archive("badpng");
    let catalog = scene_toml("a", "2024-06-10", 2.0, true).replace("a/B8.csv", "a/B8.png");
    fs::write(root.join("catalog.toml"), catalog).unwrap();
    write_scene(&root, "a", [0.02, 0.04, 0.05, 0.30, 0.20, 0.10]);
    fs::write(root.join("a").join("B8.png"), b"not a png").unwrap();

    let provider = LocalArchiveProvider::open(&root).unwrap();
    let result = provider.fetch_composite(&request(full_scene_aoi()));
    assert!(matches!(result, Err(RiskError::ImageError(_))));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_missing_catalog() {
    let root = temp_archive("missing");
    assert!(matches!(LocalArchiveProvider::open(&root), Err(RiskError::FetchError(_))));
    let _ = fs::remove_dir_all(&root);
}
