use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use vegrisk::utils::logger::Logger;
use vegrisk::commands::{CommandFactory, VegriskCommandFactory};

fn main() {
    let matches = ClapCommand::new("vegrisk")
        .version("0.1.0")
        .about("Vegetation indices and wildfire risk from Sentinel-2 and Landsat imagery")
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file; command-line flags override its values")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("archive")
                .short('a')
                .long("archive")
                .help("Scene archive directory containing catalog.toml")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("bbox")
                .long("bbox")
                .help("Area of interest as minlon,minlat,maxlon,maxlat")
                .value_name("BBOX")
                .conflicts_with("point")
                .required(false),
        )
        .arg(
            Arg::new("point")
                .long("point")
                .help("Center of a circular area of interest as lon,lat")
                .value_name("LON,LAT")
                .required(false),
        )
        .arg(
            Arg::new("buffer-km")
                .long("buffer-km")
                .help("Radius around --point in kilometres (default 5)")
                .value_name("KM")
                .required(false),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .help("First acquisition date, YYYY-MM-DD (default: 90 days before --end)")
                .value_name("DATE")
                .required(false),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .help("Day after the last acquisition date, YYYY-MM-DD (default: today)")
                .value_name("DATE")
                .required(false),
        )
        .arg(
            Arg::new("satellite")
                .short('s')
                .long("satellite")
                .help("Imaging mission (sentinel2, landsat8, landsat9)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("max-cloud")
                .long("max-cloud")
                .help("Skip scenes with this cloud percentage or more (default 20)")
                .value_name("PERCENT")
                .required(false),
        )
        .arg(
            Arg::new("max-pixels")
                .long("max-pixels")
                .help("Refuse composites larger than this many pixels")
                .value_name("COUNT")
                .required(false),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .help("Write every layer to this directory")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("array-format")
                .long("array-format")
                .help("Format for exported layers (csv, json, npy)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("pixel")
                .long("pixel")
                .help("Score one pixel from reflectance values blue,green,red,nir,swir1,swir2")
                .value_name("VALUES")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_file = "vegrisk.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("vegrisk-global.log", matches.get_flag("verbose")) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = VegriskCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
