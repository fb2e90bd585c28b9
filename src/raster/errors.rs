//! Custom error types for imagery and risk processing

use std::fmt;
use std::io;

use super::band::Band;

/// Errors raised while fetching imagery or computing layers
#[derive(Debug)]
pub enum RiskError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// Malformed TOML catalog or configuration
    ConfigError(String),
    /// Invalid user-supplied argument
    InvalidArgument(String),
    /// A band required by a formula is absent from the image
    MissingBand(Band),
    /// Two grids that must align have different sizes
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// No scene survived the date, area and cloud filters
    EmptyCollection {
        satellite: String,
        start: String,
        end: String,
    },
    /// The requested composite exceeds the local materialization limit
    AreaTooLarge { pixels: u64, limit: u64 },
    /// Upstream imagery service failure
    FetchError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for RiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskError::IoError(e) => write!(f, "I/O error: {}", e),
            RiskError::ImageError(e) => write!(f, "Image error: {}", e),
            RiskError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RiskError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            RiskError::MissingBand(band) => write!(f, "Band not present in image: {}", band),
            RiskError::DimensionMismatch { expected, found } => write!(
                f,
                "Grid size mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            RiskError::EmptyCollection { satellite, start, end } => write!(
                f,
                "No {} scenes match the area and cloud filter between {} and {}",
                satellite, start, end
            ),
            RiskError::AreaTooLarge { pixels, limit } => write!(
                f,
                "Composite of {} pixels exceeds the local limit of {}; reduce the area or export instead",
                pixels, limit
            ),
            RiskError::FetchError(msg) => write!(f, "Imagery fetch failed: {}", msg),
            RiskError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RiskError {}

impl From<io::Error> for RiskError {
    fn from(error: io::Error) -> Self {
        RiskError::IoError(error)
    }
}

impl From<image::ImageError> for RiskError {
    fn from(error: image::ImageError) -> Self {
        RiskError::ImageError(error)
    }
}

impl From<toml::de::Error> for RiskError {
    fn from(error: toml::de::Error) -> Self {
        RiskError::ConfigError(error.to_string())
    }
}

impl From<String> for RiskError {
    fn from(msg: String) -> Self {
        RiskError::GenericError(msg)
    }
}

/// Result type for imagery and risk operations
pub type RiskResult<T> = Result<T, RiskError>;
