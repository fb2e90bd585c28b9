//! Imagery provider interface

use crate::raster::band_image::BandImage;
use crate::raster::errors::RiskResult;

use super::request::CompositeRequest;

/// Source of cloud-filtered composite imagery
///
/// Implementations select the scenes matching a request, mask and
/// composite them, and return reflectance bands under canonical names.
pub trait ImageryProvider {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Build a composite image for the request
    ///
    /// # Returns
    /// The composite, or an error if no scene matches or retrieval fails
    fn fetch_composite(&self, request: &CompositeRequest) -> RiskResult<BandImage>;
}
