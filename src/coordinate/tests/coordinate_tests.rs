//! Tests for coordinate handling

use crate::coordinate::geodesy::haversine_distance;
use crate::coordinate::{AreaOfInterest, BoundingBox, PixelRegion, Point};

#[test]
fn test_bbox_parsing() {
    let bbox: BoundingBox = "-118.7, 34.0, -118.5, 34.2".parse().unwrap();
    assert_eq!(bbox.min_x, -118.7);
    assert_eq!(bbox.max_y, 34.2);

    assert!("1,2,3".parse::<BoundingBox>().is_err());
    assert!("3,2,1,4".parse::<BoundingBox>().is_err());
    assert!("a,b,c,d".parse::<BoundingBox>().is_err());
}

#[test]
fn test_point_parsing() {
    let point: Point = "-118.6,34.1".parse().unwrap();
    assert_eq!(point.lon(), -118.6);
    assert_eq!(point.lat(), 34.1);
    assert!("200,10".parse::<Point>().is_err());
}

#[test]
fn test_intersection() {
    let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
    let b = BoundingBox::new(1.0, 1.0, 3.0, 3.0);
    let c = BoundingBox::new(2.0, 0.0, 4.0, 2.0);

    assert_eq!(a.intersection(&b), Some(BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
    // Touching edges do not overlap
    assert!(!a.intersects(&c));
    assert_eq!(a.intersection(&c), None);
}

#[test]
fn test_pixel_region_round_trip_on_grid() {
    // 10x10 pixels over a 1x1 degree box
    let scene = BoundingBox::new(10.0, 40.0, 11.0, 41.0);
    let gt = scene.geotransform(10, 10);

    let aoi = BoundingBox::new(10.2, 40.5, 10.5, 40.8);
    let region = aoi.to_pixel_region(&gt);
    assert_eq!(region, PixelRegion::new(2, 2, 3, 3));

    let back = BoundingBox::from_pixel_region(&region, &gt);
    assert!((back.min_x - 10.2).abs() < 1e-9);
    assert!((back.max_x - 10.5).abs() < 1e-9);
    assert!((back.min_y - 40.5).abs() < 1e-9);
    assert!((back.max_y - 40.8).abs() < 1e-9);
}

#[test]
fn test_pixel_region_covers_partial_pixels() {
    let scene = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let gt = scene.geotransform(10, 10);

    let region = BoundingBox::new(0.5, 8.5, 1.5, 9.5).to_pixel_region(&gt);
    assert_eq!(region, PixelRegion::new(0, 0, 2, 2));
}

#[test]
fn test_align_to_grid_snaps_outward() {
    // Lattice of 0.001 degree pixels anchored far from the box
    let gt = [-1.0, 0.001, 0.0, 1.0, 0.0, -0.001];

    let (bounds, region) = BoundingBox::new(0.0002, 0.0002, 0.0018, 0.0008).align_to_grid(&gt);
    assert_eq!(region, PixelRegion::new(0, 0, 2, 1));
    assert!((bounds.min_x - 0.0).abs() < 1e-9);
    assert!((bounds.max_x - 0.002).abs() < 1e-9);
    assert!((bounds.min_y - 0.0).abs() < 1e-9);
    assert!((bounds.max_y - 0.001).abs() < 1e-9);

    // A box already on the lattice keeps its extent
    let (same, region) = BoundingBox::new(0.0, 0.0, 0.002, 0.002).align_to_grid(&gt);
    assert_eq!(region, PixelRegion::new(0, 0, 2, 2));
    assert!((same.max_y - 0.002).abs() < 1e-9);
}

#[test]
fn test_union() {
    let a = BoundingBox::new(0.0, 0.0, 2.0, 1.0);
    let b = BoundingBox::new(1.0, -1.0, 3.0, 0.5);
    assert_eq!(a.union(&b), BoundingBox::new(0.0, -1.0, 3.0, 1.0));
}

#[test]
fn test_haversine_one_degree_latitude() {
    let d = haversine_distance(&Point::new(0.0, 0.0), &Point::new(0.0, 1.0));
    assert!((d - 111_195.0).abs() < 100.0);
}

#[test]
fn test_buffered_area_contains() {
    let center = Point::new(-118.6, 34.1);
    let aoi = AreaOfInterest::buffered_point(center, 5.0);

    assert!(aoi.contains(&center));
    // About 3.3 km north
    assert!(aoi.contains(&Point::new(-118.6, 34.13)));
    // About 11 km north
    assert!(!aoi.contains(&Point::new(-118.6, 34.2)));

    let bbox = aoi.bounding_box();
    assert!(bbox.contains(&Point::new(-118.6, 34.14)));
    assert!((bbox.height() * 111.195 - 10.0).abs() < 0.05);
}
