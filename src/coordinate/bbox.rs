//! Bounding box structure for defining regions

use std::str::FromStr;

use crate::raster::errors::{RiskError, RiskResult};

use super::geodesy::{meters_to_lat_degrees, meters_to_lon_degrees, METERS_PER_DEGREE};
use super::point::Point;
use super::region::PixelRegion;

/// Tolerance for snapping geographic edges onto pixel edges
const PIXEL_EPSILON: f64 = 1e-9;

/// A longitude/latitude bounding box in degrees (EPSG:4326)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate (west)
    pub min_x: f64,
    /// Minimum Y coordinate (south)
    pub min_y: f64,
    /// Maximum X coordinate (east)
    pub max_x: f64,
    /// Maximum Y coordinate (north)
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Create a validated bounding box
    ///
    /// # Returns
    /// The box, or an error if min exceeds max on either axis
    pub fn try_new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> RiskResult<Self> {
        if min_x >= max_x || min_y >= max_y {
            return Err(RiskError::InvalidArgument(format!(
                "Bounding box minimum must be below maximum: {},{},{},{}",
                min_x, min_y, max_x, max_y
            )));
        }
        Ok(BoundingBox::new(min_x, min_y, max_x, max_y))
    }

    /// Create from a `[min_x, min_y, max_x, max_y]` array
    pub fn from_array(values: [f64; 4]) -> RiskResult<Self> {
        BoundingBox::try_new(values[0], values[1], values[2], values[3])
    }

    /// Get the width of the bounding box in degrees
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box in degrees
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    /// Check whether two boxes overlap with a non-zero area
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x && other.min_x < self.max_x &&
            self.min_y < other.max_y && other.min_y < self.max_y
    }

    /// Overlapping part of two boxes, if any
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        Some(BoundingBox::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Square box around a point, extending `radius_m` meters on each side
    pub fn from_point_buffer(center: &Point, radius_m: f64) -> Self {
        let dx = meters_to_lon_degrees(radius_m, center.y);
        let dy = meters_to_lat_degrees(radius_m);
        BoundingBox::new(
            center.x - dx,
            center.y - dy,
            center.x + dx,
            center.y + dy,
        )
    }

    /// Approximate ground area in square kilometres
    pub fn area_km2(&self) -> f64 {
        let mid_lat = self.center().y.to_radians();
        let width_m = self.width() * METERS_PER_DEGREE * mid_lat.cos();
        let height_m = self.height() * METERS_PER_DEGREE;
        width_m * height_m / 1e6
    }

    /// Geotransform for an image of `width` x `height` pixels covering this box
    ///
    /// # Returns
    /// Array of 6 coefficients: [origin_x, pixel_width, 0, origin_y, 0, pixel_height]
    pub fn geotransform(&self, width: u32, height: u32) -> [f64; 6] {
        [
            self.min_x,
            self.width() / width as f64,
            0.0,
            self.max_y,
            0.0,
            -self.height() / height as f64,
        ]
    }

    /// Convert to a pixel region given a geotransform
    ///
    /// # Arguments
    /// * `geotransform` - Array of 6 coefficients: [origin_x, pixel_width, 0, origin_y, 0, pixel_height]
    ///
    /// # Returns
    /// A region covering every pixel the box touches; not clipped to any image
    pub fn to_pixel_region(&self, geotransform: &[f64; 6]) -> PixelRegion {
        let origin_x = geotransform[0];
        let pixel_width = geotransform[1];
        let origin_y = geotransform[3];
        let pixel_height = geotransform[5]; // Negative for north-up images

        let x_min = ((self.min_x - origin_x) / pixel_width + PIXEL_EPSILON).floor() as i64;
        let x_max = ((self.max_x - origin_x) / pixel_width - PIXEL_EPSILON).ceil() as i64;
        let y_min = ((self.max_y - origin_y) / pixel_height + PIXEL_EPSILON).floor() as i64;
        let y_max = ((self.min_y - origin_y) / pixel_height - PIXEL_EPSILON).ceil() as i64;

        let start_x = x_min.max(0);
        let start_y = y_min.max(0);

        let width = (x_max - start_x).max(0) as u32;
        let height = (y_max - start_y).max(0) as u32;

        PixelRegion::new(start_x as u32, start_y as u32, width, height)
    }

    /// Expand the box outward onto the pixel lattice of a geotransform
    ///
    /// The lattice may lie anywhere relative to the box; only its pixel
    /// size and phase are used.
    ///
    /// # Returns
    /// The snapped box and its size in pixels as a region at (0, 0)
    pub fn align_to_grid(&self, geotransform: &[f64; 6]) -> (BoundingBox, PixelRegion) {
        let pixel_width = geotransform[1];
        let pixel_height = geotransform[5];

        let col = ((self.min_x - geotransform[0]) / pixel_width + PIXEL_EPSILON).floor();
        let row = ((self.max_y - geotransform[3]) / pixel_height + PIXEL_EPSILON).floor();
        let origin = [
            geotransform[0] + col * pixel_width,
            pixel_width,
            0.0,
            geotransform[3] + row * pixel_height,
            0.0,
            pixel_height,
        ];

        let region = self.to_pixel_region(&origin);
        (BoundingBox::from_pixel_region(&region, &origin), region)
    }

    /// Geographic extent of a pixel region under a geotransform
    pub fn from_pixel_region(region: &PixelRegion, geotransform: &[f64; 6]) -> Self {
        let min_x = geotransform[0] + region.x as f64 * geotransform[1];
        let max_x = geotransform[0] + region.end_x() as f64 * geotransform[1];
        let max_y = geotransform[3] + region.y as f64 * geotransform[5];
        let min_y = geotransform[3] + region.end_y() as f64 * geotransform[5];
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// Center of the pixel at column `x`, row `y` under a geotransform
    pub fn pixel_center(geotransform: &[f64; 6], x: u32, y: u32) -> Point {
        Point::new(
            geotransform[0] + (x as f64 + 0.5) * geotransform[1],
            geotransform[3] + (y as f64 + 0.5) * geotransform[5],
        )
    }
}

impl FromStr for BoundingBox {
    type Err = RiskError;

    /// Parse a bounding box from "minx,miny,maxx,maxy"
    fn from_str(bbox_str: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(RiskError::InvalidArgument(
                "Bounding box must have 4 comma-separated values".to_string(),
            ));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(parts.iter()) {
            *slot = part.trim().parse::<f64>()
                .map_err(|_| RiskError::InvalidArgument(format!("Invalid bounding box value: {}", part)))?;
        }

        BoundingBox::from_array(values)
    }
}
