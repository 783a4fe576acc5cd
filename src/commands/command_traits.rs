//! Command pattern interfaces
//!
//! Each CLI operation is a `Command` built by a `CommandFactory` from the
//! parsed arguments.

use crate::config::LoaderConfig;
use crate::index::errors::IndexResult;
use crate::utils::logger::Logger;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    fn execute(&self) -> IndexResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Settings read from the configuration file
    /// * `logger` - Logger receiving one summary line per tile
    fn create_command(
        &self,
        args: &clap::ArgMatches,
        config: &LoaderConfig,
        logger: &'a Logger,
    ) -> IndexResult<Box<dyn Command + 'a>>;
}
