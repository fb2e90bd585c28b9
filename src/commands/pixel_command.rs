//! Single-pixel scoring command
//!
//! Computes every index and the fire risk for one set of reflectance
//! values given on the command line.

use clap::ArgMatches;
use log::info;

use crate::api::PixelAssessment;
use crate::commands::command_traits::Command;
use crate::raster::errors::{RiskError, RiskResult};
use crate::utils::logger::Logger;

/// Command for scoring one pixel
pub struct PixelCommand<'a> {
    /// Blue, Green, Red, NIR, SWIR1, SWIR2 reflectance
    bands: [f32; 6],
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PixelCommand<'a> {
    /// Create a new pixel command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new PixelCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> RiskResult<Self> {
        let raw = args.get_one::<String>("pixel")
            .ok_or_else(|| RiskError::InvalidArgument("Missing pixel values".to_string()))?;

        Ok(PixelCommand {
            bands: parse_pixel(raw)?,
            logger,
        })
    }
}

/// Parse "blue,green,red,nir,swir1,swir2" reflectance values
pub fn parse_pixel(s: &str) -> RiskResult<[f32; 6]> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim().parse::<f32>().map_err(|_| {
                RiskError::InvalidArgument(format!("Invalid reflectance value: {}", part))
            })
        })
        .collect::<RiskResult<Vec<f32>>>()?;

    <[f32; 6]>::try_from(values).map_err(|v| {
        RiskError::InvalidArgument(format!(
            "Pixel needs 6 values (blue,green,red,nir,swir1,swir2), got {}", v.len()
        ))
    })
}

impl<'a> Command for PixelCommand<'a> {
    fn execute(&self) -> RiskResult<()> {
        info!("Scoring pixel {:?}", self.bands);

        let assessment = PixelAssessment::from_bands(self.bands);
        let text = assessment.to_string();
        self.logger.log_block("Pixel assessment", &text)?;

        print!("{}", text);
        Ok(())
    }
}
