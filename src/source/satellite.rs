//! Satellite collection definitions
//!
//! Band mappings and reflectance scaling for each supported mission are
//! read from `satellites.toml`, which is compiled into the binary.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::raster::band::Band;
use crate::raster::errors::{RiskError, RiskResult};

lazy_static! {
    // Parse the satellite table once at first use
    static ref SATELLITE_DEFINITIONS: HashMap<String, SatelliteDefinition> = {
        let content = include_str!("../../satellites.toml");
        parse_definitions(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse satellite definitions: {}", e);
            HashMap::new()
        })
    };
}

/// Supported imaging missions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Satellite {
    /// Sentinel-2 Level-2A surface reflectance
    Sentinel2,
    /// Landsat 8 Collection 2 Level-2
    Landsat8,
    /// Landsat 9 Collection 2 Level-2
    Landsat9,
}

/// Per-mission collection metadata
#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteDefinition {
    /// Human-readable mission name
    pub name: String,
    /// Collection identifier on the imagery service
    pub collection: String,
    /// Scene property holding the cloud percentage
    pub cloud_property: String,
    /// Native ground resolution in meters
    pub native_resolution_m: f64,
    /// Multiplier from stored value to reflectance
    pub scale: f64,
    /// Offset added after scaling
    pub offset: f64,
    /// Canonical band key to native band name
    pub bands: HashMap<String, String>,
}

impl SatelliteDefinition {
    /// Native band name for a canonical band
    pub fn native_band(&self, band: Band) -> Option<&str> {
        self.bands.get(band.key()).map(|s| s.as_str())
    }

    /// Canonical band for a native band name
    pub fn canonical_band(&self, native: &str) -> Option<Band> {
        Band::ALL
            .iter()
            .copied()
            .find(|band| self.native_band(*band) == Some(native))
    }

    /// Convert a stored digital number to surface reflectance
    pub fn to_reflectance(&self, dn: f32) -> f32 {
        (dn as f64 * self.scale + self.offset) as f32
    }
}

fn parse_definitions(content: &str) -> RiskResult<HashMap<String, SatelliteDefinition>> {
    let defs: HashMap<String, SatelliteDefinition> = toml::from_str(content)?;
    Ok(defs)
}

impl Satellite {
    /// All supported satellites
    pub const ALL: [Satellite; 3] = [Satellite::Sentinel2, Satellite::Landsat8, Satellite::Landsat9];

    /// Key used in configuration files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Satellite::Sentinel2 => "sentinel2",
            Satellite::Landsat8 => "landsat8",
            Satellite::Landsat9 => "landsat9",
        }
    }

    /// Collection metadata for this satellite
    pub fn definition(&self) -> RiskResult<&'static SatelliteDefinition> {
        SATELLITE_DEFINITIONS.get(self.key()).ok_or_else(|| {
            RiskError::ConfigError(format!("No definition for satellite '{}'", self.key()))
        })
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.definition() {
            Ok(def) => write!(f, "{}", def.name),
            Err(_) => write!(f, "{}", self.key()),
        }
    }
}

impl FromStr for Satellite {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        Satellite::ALL
            .iter()
            .copied()
            .find(|sat| sat.key() == key)
            .ok_or_else(|| RiskError::InvalidArgument(format!(
                "satellite must be 'sentinel2', 'landsat8', or 'landsat9', got '{}'", s
            )))
    }
}

impl<'de> Deserialize<'de> for Satellite {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
