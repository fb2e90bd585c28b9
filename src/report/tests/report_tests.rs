//! Tests for the console report and layer export

use std::fs;

use crate::indices::tests::test_utils::image_from_pixels;
use crate::indices::{IndexCalculator, SpectralIndex};
use crate::raster::array_io::{load_csv, ArrayFormat};
use crate::raster::grid::{is_no_data, Grid};
use crate::report::{export_layers, AnalysisReport, ReportContext};
use crate::risk::{classify, OverallRisk, RiskScorer};

fn sample_report() -> AnalysisReport {
    // blue, green, red, nir, swir1, swir2
    let image = image_from_pixels(&[
        [0.03, 0.05, 0.10, 0.40, 0.20, 0.10],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]);
    let calc = IndexCalculator::new(&image);
    let indices = calc.compute_all().unwrap();
    let color = calc.plant_color().unwrap();
    let scores = RiskScorer::score_layers(&indices, &color).unwrap();
    let classes = classify(&scores);

    AnalysisReport::from_layers(&indices, &color, &scores, &classes, image.pixel_area_km2())
}

#[test]
fn test_report_excludes_no_data_pixel() {
    let report = sample_report();

    let ndvi = report.index(SpectralIndex::Ndvi).unwrap();
    assert_eq!(ndvi.count, 1);
    assert!((ndvi.mean - 0.6).abs() < 1e-6);
    assert_eq!(report.class_areas.valid_pixels(), 1);
    assert_eq!(report.class_areas.no_data_pixels(), 1);
}

#[test]
fn test_report_sections() {
    let report = sample_report().with_context(ReportContext {
        satellite: "Sentinel-2".to_string(),
        area: "[0.0000, 0.0000, 0.0020, 0.0010]".to_string(),
        dates: "2024-06-01 to 2024-09-01".to_string(),
        width: 2,
        height: 1,
        pixel_size_m: 10.0,
    });
    let text = report.to_string();

    assert!(text.contains("FIRE RISK VEGETATION ANALYSIS REPORT"));
    assert!(text.contains("1. VEGETATION INDICES SUMMARY"));
    assert!(text.contains("2. FIRE RISK DISTRIBUTION"));
    assert!(text.contains("3. OVERALL FIRE RISK ASSESSMENT"));
    assert!(text.contains("NDVI - Mean: 0.600"));
    assert!(text.contains("Satellite: Sentinel-2"));
    assert!(text.contains("Very High   :"));
    assert!(text.contains("No data     : 1 pixels excluded"));

    let overall = report.overall().unwrap();
    assert!(text.contains(&format!("Overall Risk Level: {}", overall.label())));
    assert!(text.contains(overall.recommendation()));
}

#[test]
fn test_report_without_valid_pixels() {
    let image = image_from_pixels(&[[0.0; 6]]);
    let calc = IndexCalculator::new(&image);
    let indices = calc.compute_all().unwrap();
    let color = calc.plant_color().unwrap();
    let scores = RiskScorer::score_layers(&indices, &color).unwrap();
    let report = AnalysisReport::from_layers(&indices, &color, &scores, &classify(&scores), 0.0001);

    assert!(report.overall().is_none());
    let text = report.to_string();
    assert!(text.contains("NDVI - no valid pixels"));
    assert!(text.contains("No valid pixels to assess"));
}

#[test]
fn test_overall_uses_mean_score() {
    let report = sample_report();
    let mean = report.mean_score().unwrap();
    assert_eq!(report.overall(), Some(OverallRisk::from_mean_score(mean as f32)));
}

#[test]
fn test_export_layers() {
    let dir = std::env::temp_dir().join(format!("vegrisk_export_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let score = Grid::from_vec(2, 1, vec![42.5, f32::NAN]).unwrap();
    let class = Grid::from_vec(2, 1, vec![3.0, f32::NAN]).unwrap();
    let written = export_layers(
        &dir,
        ArrayFormat::Csv,
        &[("Fire_Risk_Score", &score), ("Risk_Class", &class)],
    )
    .unwrap();

    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("Fire_Risk_Score.csv"));

    let loaded = load_csv(&written[0]).unwrap();
    assert_eq!(loaded.get(0, 0), Some(42.5));
    assert!(is_no_data(loaded.get(1, 0).unwrap()));

    let _ = fs::remove_dir_all(&dir);
}
