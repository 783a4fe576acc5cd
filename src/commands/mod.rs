//! CLI command implementations

pub mod command_traits;
pub mod candidates_command;
pub mod load_command;

pub use command_traits::{Command, CommandFactory};
pub use candidates_command::CandidatesCommand;
pub use load_command::LoadCommand;

use clap::ArgMatches;

use crate::config::LoaderConfig;
use crate::index::errors::{IndexError, IndexResult};
use crate::index::mode::IndexMode;
use crate::utils::logger::Logger;

/// Picks the command to run from the CLI arguments
pub struct TileindexCommandFactory;

impl TileindexCommandFactory {
    pub fn new() -> Self {
        TileindexCommandFactory
    }
}

impl Default for TileindexCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for TileindexCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        config: &LoaderConfig,
        logger: &'a Logger,
    ) -> IndexResult<Box<dyn Command + 'a>> {
        if args.get_flag("candidates") {
            Ok(Box::new(CandidatesCommand::new(args, config)?))
        } else {
            Ok(Box::new(LoadCommand::new(args, config, logger)?))
        }
    }
}

/// Reads the tile locators given on the command line
pub(crate) fn tile_args(args: &ArgMatches) -> IndexResult<Vec<String>> {
    let tiles: Vec<String> = args
        .get_many::<String>("tiles")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if tiles.is_empty() {
        return Err(IndexError::GenericError("Missing tile locator".to_string()));
    }
    Ok(tiles)
}

/// Reads `--mode`, substituting the configured policy for `default`
pub(crate) fn mode_arg(args: &ArgMatches, config: &LoaderConfig) -> IndexResult<IndexMode> {
    let mode = match args.get_one::<String>("mode") {
        Some(name) => name.parse::<IndexMode>()?,
        None => IndexMode::Default,
    };
    Ok(mode.or_policy(config.default_mode))
}
