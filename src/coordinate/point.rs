//! Point structure for geographic coordinates

use std::str::FromStr;

use crate::raster::errors::{RiskError, RiskResult};

/// A longitude/latitude position in degrees (EPSG:4326)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a point, rejecting coordinates outside the valid lon/lat range
    pub fn try_new(x: f64, y: f64) -> RiskResult<Self> {
        if !(-180.0..=180.0).contains(&x) || !(-90.0..=90.0).contains(&y) {
            return Err(RiskError::InvalidArgument(format!("Point out of range: {},{}", x, y)));
        }
        Ok(Point::new(x, y))
    }

    pub fn lon(&self) -> f64 {
        self.x
    }

    pub fn lat(&self) -> f64 {
        self.y
    }
}

impl FromStr for Point {
    type Err = RiskError;

    /// Parse a point from "lon,lat"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(RiskError::InvalidArgument(
                "Point must have 2 comma-separated values (lon,lat)".to_string(),
            ));
        }

        let x = parts[0].trim().parse::<f64>()
            .map_err(|_| RiskError::InvalidArgument(format!("Invalid longitude: {}", parts[0])))?;
        let y = parts[1].trim().parse::<f64>()
            .map_err(|_| RiskError::InvalidArgument(format!("Invalid latitude: {}", parts[1])))?;

        Point::try_new(x, y)
    }
}
