//! Fire risk analysis command
//!
//! Builds a composite from the imagery archive, computes every layer,
//! prints the statistics report and optionally exports the layers.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{debug, info};

use crate::api::Analyzer;
use crate::commands::command_traits::Command;
use crate::config::{AnalysisConfig, AreaConfig, DatesConfig, ImageryConfig, OutputConfig};
use crate::coordinate::{BoundingBox, Point};
use crate::raster::errors::{RiskError, RiskResult};
use crate::source::LocalArchiveProvider;
use crate::utils::logger::Logger;

/// Command for running a full analysis
pub struct AnalyzeCommand<'a> {
    /// Effective settings after merging the config file and CLI flags
    config: AnalysisConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> RiskResult<Self> {
        let file_config = match args.get_one::<String>("config") {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };

        let config = file_config.overlay(config_from_args(args)?);
        debug!("Effective configuration: {:?}", config);

        Ok(AnalyzeCommand { config, logger })
    }
}

/// Collect the settings given as CLI flags
pub fn config_from_args(args: &ArgMatches) -> RiskResult<AnalysisConfig> {
    let bbox = args
        .get_one::<String>("bbox")
        .map(|s| s.parse::<BoundingBox>())
        .transpose()?
        .map(|b| [b.min_x, b.min_y, b.max_x, b.max_y]);

    let point = args
        .get_one::<String>("point")
        .map(|s| s.parse::<Point>())
        .transpose()?
        .map(|p| [p.x, p.y]);

    Ok(AnalysisConfig {
        area: AreaConfig {
            bbox,
            point,
            buffer_km: parse_number(args, "buffer-km")?,
        },
        dates: DatesConfig {
            start: args.get_one::<String>("start").cloned(),
            end: args.get_one::<String>("end").cloned(),
        },
        imagery: ImageryConfig {
            satellite: args.get_one::<String>("satellite").map(|s| s.parse()).transpose()?,
            archive: args.get_one::<String>("archive").map(PathBuf::from),
            max_cloud_percent: parse_number(args, "max-cloud")?,
            max_pixels: parse_number(args, "max-pixels")?,
        },
        output: OutputConfig {
            dir: args.get_one::<String>("export").map(PathBuf::from),
            array_format: args.get_one::<String>("array-format").cloned(),
        },
    })
}

fn parse_number<T: std::str::FromStr>(args: &ArgMatches, id: &str) -> RiskResult<Option<T>> {
    args.get_one::<String>(id)
        .map(|s| {
            s.trim().parse::<T>().map_err(|_| {
                RiskError::InvalidArgument(format!("Invalid value for --{}: {}", id, s))
            })
        })
        .transpose()
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> RiskResult<()> {
        let request = self.config.composite_request()?;
        let archive = self.config.archive()?;
        info!("Analyzing {} over {} ({})", request.satellite, request.aoi, request.dates);

        let provider = LocalArchiveProvider::open(archive)?.with_progress(true);
        let analyzer = Analyzer::new(self.logger);
        let result = analyzer.analyze(&provider, &request)?;

        let text = result.report.to_string();
        self.logger.log_block("Fire risk report", &text)?;
        print!("{}", text);

        if let Some(dir) = &self.config.output.dir {
            let format = self.config.array_format()?;
            let written = analyzer.export(&result, dir, format)?;
            for path in &written {
                self.logger.log(&format!("Wrote {}", path.display()))?;
            }
            println!("Exported {} layers to {}", written.len(), dir.display());
        }

        Ok(())
    }
}
