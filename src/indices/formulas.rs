//! Per-pixel spectral index formulas
//!
//! Every formula returns [`NO_DATA`] when an input is no-data or the
//! denominator is zero, so callers never see infinities or errors from a
//! single pixel.

use crate::raster::grid::{is_no_data, NO_DATA};

/// Soil brightness correction factor for SAVI
pub const SAVI_L: f32 = 0.5;

/// EVI gain factor
pub const EVI_G: f32 = 2.5;
/// EVI aerosol coefficient for the red band
pub const EVI_C1: f32 = 6.0;
/// EVI aerosol coefficient for the blue band
pub const EVI_C2: f32 = 7.5;
/// EVI canopy background adjustment
pub const EVI_L: f32 = 1.0;

/// Offset keeping the redness ratio finite over dark NIR pixels
pub const REDNESS_EPSILON: f32 = 0.0001;

#[inline]
fn any_no_data(values: &[f32]) -> bool {
    values.iter().any(|v| is_no_data(*v))
}

/// Divide, yielding no-data for a zero denominator
#[inline]
fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 {
        NO_DATA
    } else {
        numerator / denominator
    }
}

/// `(a - b) / (a + b)`
pub fn normalized_difference(a: f32, b: f32) -> f32 {
    if any_no_data(&[a, b]) {
        return NO_DATA;
    }
    ratio(a - b, a + b)
}

/// `NDVI = (NIR - Red) / (NIR + Red)`
pub fn ndvi(nir: f32, red: f32) -> f32 {
    normalized_difference(nir, red)
}

/// `SAVI = ((NIR - Red) / (NIR + Red + L)) * (1 + L)`
pub fn savi(nir: f32, red: f32, l: f32) -> f32 {
    if any_no_data(&[nir, red]) {
        return NO_DATA;
    }
    ratio(nir - red, nir + red + l) * (1.0 + l)
}

/// `EVI = 2.5 * (NIR - Red) / (NIR + 6 * Red - 7.5 * Blue + 1)`
pub fn evi(nir: f32, red: f32, blue: f32) -> f32 {
    if any_no_data(&[nir, red, blue]) {
        return NO_DATA;
    }
    EVI_G * ratio(nir - red, nir + EVI_C1 * red - EVI_C2 * blue + EVI_L)
}

/// `NDMI = (NIR - SWIR1) / (NIR + SWIR1)`
pub fn ndmi(nir: f32, swir1: f32) -> f32 {
    normalized_difference(nir, swir1)
}

/// `NBR = (NIR - SWIR2) / (NIR + SWIR2)`
pub fn nbr(nir: f32, swir2: f32) -> f32 {
    normalized_difference(nir, swir2)
}

/// `BSI = ((SWIR1 + Red) - (NIR + Blue)) / ((SWIR1 + Red) + (NIR + Blue))`
pub fn bsi(swir1: f32, red: f32, nir: f32, blue: f32) -> f32 {
    if any_no_data(&[swir1, red, nir, blue]) {
        return NO_DATA;
    }
    let soil = swir1 + red;
    let vegetation = nir + blue;
    ratio(soil - vegetation, soil + vegetation)
}

/// Greenness: `NIR - Red`
pub fn greenness(nir: f32, red: f32) -> f32 {
    if any_no_data(&[nir, red]) {
        return NO_DATA;
    }
    nir - red
}

/// Redness (plant stress ratio): `Red / (NIR + 0.0001)`
pub fn redness(red: f32, nir: f32) -> f32 {
    if any_no_data(&[red, nir]) {
        return NO_DATA;
    }
    ratio(red, nir + REDNESS_EPSILON)
}

/// Brightness: mean of the visible bands
pub fn brightness(red: f32, green: f32, blue: f32) -> f32 {
    if any_no_data(&[red, green, blue]) {
        return NO_DATA;
    }
    (red + green + blue) / 3.0
}
