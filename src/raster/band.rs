//! Canonical spectral band names

use std::fmt;
use std::str::FromStr;

use super::errors::RiskError;

/// Spectral bands every satellite mapping resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    Blue,
    Green,
    Red,
    Nir,
    Swir1,
    Swir2,
}

impl Band {
    /// All canonical bands in wavelength order
    pub const ALL: [Band; 6] = [
        Band::Blue,
        Band::Green,
        Band::Red,
        Band::Nir,
        Band::Swir1,
        Band::Swir2,
    ];

    /// Lowercase key used in catalogs and configuration files
    pub fn key(&self) -> &'static str {
        match self {
            Band::Blue => "blue",
            Band::Green => "green",
            Band::Red => "red",
            Band::Nir => "nir",
            Band::Swir1 => "swir1",
            Band::Swir2 => "swir2",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::Blue => "Blue",
            Band::Green => "Green",
            Band::Red => "Red",
            Band::Nir => "NIR",
            Band::Swir1 => "SWIR1",
            Band::Swir2 => "SWIR2",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Band {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .iter()
            .copied()
            .find(|band| band.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RiskError::InvalidArgument(format!("Unknown band name: {}", s)))
    }
}
