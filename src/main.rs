use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use tileindex::commands::{CommandFactory, TileindexCommandFactory};
use tileindex::config::LoaderConfig;
use tileindex::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("tileindex")
        .version("0.1")
        .about("Load per-tile raster index maps from glTF/GLB tiles and sibling PPM files")
        .arg(
            Arg::new("tiles")
                .help("Tile locators, relative to the root directory")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .help("Index mode (none, default, external-raster, external-raster-compressed, embedded-raster, embedded-raster-compressed)")
                .value_name("MODE")
                .default_value("default"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Directory tile locators are resolved against")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("candidates")
                .long("candidates")
                .help("List candidate resources instead of loading")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .help("Write band 0 of the first loaded map as a PNG")
                .value_name("FILE")
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

    let config = match matches.get_one::<String>("config") {
        Some(path) => match LoaderConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading configuration: {}", e);
                process::exit(1);
            }
        },
        None => LoaderConfig::default(),
    };

    let logger = match Logger::new(&config.summary_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger(&config.log_file, matches.get_flag("verbose")) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = TileindexCommandFactory::new();

    let command_result = factory.create_command(&matches, &config, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
