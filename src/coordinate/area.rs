//! Area of interest for an analysis run

use std::fmt;

use super::bbox::BoundingBox;
use super::geodesy::haversine_distance;
use super::point::Point;

/// Region an analysis is restricted to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaOfInterest {
    /// Rectangle in longitude/latitude
    Bounds(BoundingBox),
    /// Circle of `radius_m` meters around a point
    Buffer { center: Point, radius_m: f64 },
}

impl AreaOfInterest {
    /// Circle around a point with the radius given in kilometres
    pub fn buffered_point(center: Point, radius_km: f64) -> Self {
        AreaOfInterest::Buffer { center, radius_m: radius_km * 1000.0 }
    }

    /// Smallest bounding box enclosing the area
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            AreaOfInterest::Bounds(bbox) => *bbox,
            AreaOfInterest::Buffer { center, radius_m } => {
                BoundingBox::from_point_buffer(center, *radius_m)
            }
        }
    }

    /// Check whether a point lies inside the area
    pub fn contains(&self, point: &Point) -> bool {
        match self {
            AreaOfInterest::Bounds(bbox) => bbox.contains(point),
            AreaOfInterest::Buffer { center, radius_m } => {
                haversine_distance(center, point) <= *radius_m
            }
        }
    }
}

impl fmt::Display for AreaOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaOfInterest::Bounds(b) => {
                write!(f, "[{:.4}, {:.4}, {:.4}, {:.4}]", b.min_x, b.min_y, b.max_x, b.max_y)
            }
            AreaOfInterest::Buffer { center, radius_m } => {
                write!(f, "{:.2} km around ({:.4}, {:.4})", radius_m / 1000.0, center.x, center.y)
            }
        }
    }
}
