//! Lists the resources a load would try, without fetching anything

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{mode_arg, tile_args};
use crate::config::LoaderConfig;
use crate::index::errors::IndexResult;
use crate::index::mode::IndexMode;
use crate::loader::resolver::CandidateResolver;

/// Prints the candidate list for each tile
pub struct CandidatesCommand {
    tiles: Vec<String>,
    mode: IndexMode,
}

impl CandidatesCommand {
    pub fn new(args: &ArgMatches, config: &LoaderConfig) -> IndexResult<Self> {
        Ok(CandidatesCommand {
            tiles: tile_args(args)?,
            mode: mode_arg(args, config)?,
        })
    }

    /// Candidate locators for one tile, in the order they would be fetched
    pub fn candidates_for(&self, tile: &str) -> Vec<String> {
        CandidateResolver::candidates(self.mode, tile)
            .iter()
            .map(|candidate| CandidateResolver::sibling(tile, candidate))
            .collect()
    }
}

impl Command for CandidatesCommand {
    fn execute(&self) -> IndexResult<()> {
        info!("Listing {} candidates for {} tile(s)", self.mode, self.tiles.len());
        for tile in &self.tiles {
            println!("{}:", tile);
            for candidate in self.candidates_for(tile) {
                println!("  {}", candidate);
            }
        }
        Ok(())
    }
}
