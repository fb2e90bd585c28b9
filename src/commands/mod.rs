//! CLI command implementations
//!
//! This module contains the commands supported by the CLI application,
//! built with the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod pixel_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use pixel_command::PixelCommand;

use clap::ArgMatches;
use crate::raster::errors::RiskResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct VegriskCommandFactory;

impl VegriskCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        VegriskCommandFactory
    }
}

impl Default for VegriskCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for VegriskCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> RiskResult<Box<dyn Command + 'a>> {
        if args.contains_id("pixel") {
            // Scoring a single pixel needs no imagery
            Ok(Box::new(PixelCommand::new(args, logger)?))
        } else {
            // Default to analyze, which also handles --export
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}
