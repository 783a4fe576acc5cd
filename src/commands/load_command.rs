//! Loads index maps for one or more tiles
//!
//! Tile locators are resolved against the configured root directory. Each
//! loaded map is summarised on stdout and in the summary log; `--preview`
//! additionally writes band 0 of the first loaded map as a PNG.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{debug, info, warn};

use crate::commands::command_traits::Command;
use crate::commands::{mode_arg, tile_args};
use crate::config::LoaderConfig;
use crate::index::errors::{IndexError, IndexResult};
use crate::index::map::IndexMap;
use crate::index::mode::IndexMode;
use crate::loader::fetch::FileFetcher;
use crate::loader::orchestrator::{IndexLoadCallback, IndexLoader};
use crate::utils::logger::Logger;
use crate::utils::preview::save_preview;
use crate::utils::progress::ProgressTracker;

/// Command for loading index maps from the local filesystem
pub struct LoadCommand<'a> {
    tiles: Vec<String>,
    mode: IndexMode,
    root: PathBuf,
    preview: Option<String>,
    logger: &'a Logger,
}

/// Collects the outcome of each load for reporting
struct LoadReport<'l> {
    tile: String,
    logger: &'l Logger,
    loaded: Option<IndexMap>,
    failed: bool,
}

impl IndexLoadCallback for LoadReport<'_> {
    fn on_success(&mut self, map: Option<IndexMap>) {
        let line = match &map {
            Some(map) => format!("{}: {}", self.tile, map),
            None => format!("{}: no index requested", self.tile),
        };
        println!("{}", line);
        let _ = self.logger.log(&line);
        self.loaded = map;
    }

    fn on_fail(&mut self, mode: IndexMode, locator: &str, message: &str) {
        let line = format!("{}: failed to load {} index for {}: {}", self.tile, mode, locator, message);
        warn!("{}", line);
        let _ = self.logger.log(&line);
        self.failed = true;
    }
}

impl<'a> LoadCommand<'a> {
    /// Create a new load command
    ///
    /// `--root` overrides the root directory from the configuration.
    pub fn new(args: &ArgMatches, config: &LoaderConfig, logger: &'a Logger) -> IndexResult<Self> {
        let root = args
            .get_one::<String>("root")
            .map(PathBuf::from)
            .unwrap_or_else(|| config.root.clone());

        Ok(LoadCommand {
            tiles: tile_args(args)?,
            mode: mode_arg(args, config)?,
            root,
            preview: args.get_one::<String>("preview").cloned(),
            logger,
        })
    }
}

impl Command for LoadCommand<'_> {
    fn execute(&self) -> IndexResult<()> {
        info!("Loading {} index for {} tile(s) from {}", self.mode, self.tiles.len(), self.root.display());

        let mut fetcher = FileFetcher::new(&self.root);
        let mut loader = IndexLoader::new(&mut fetcher);

        let progress = if self.tiles.len() > 1 {
            ProgressTracker::new(self.tiles.len() as u64, "Loading index maps")
        } else {
            ProgressTracker::hidden()
        };

        let mut failures = 0usize;
        let mut preview_written = false;
        for tile in &self.tiles {
            progress.set_message(tile);
            let mut report = LoadReport {
                tile: tile.clone(),
                logger: self.logger,
                loaded: None,
                failed: false,
            };
            loader.load_with(self.mode, tile, &mut report);
            progress.increment(1);

            if report.failed {
                failures += 1;
                continue;
            }
            if let (Some(path), Some(map)) = (&self.preview, &report.loaded) {
                if !preview_written {
                    save_preview(map, path)?;
                    preview_written = true;
                }
            }
        }
        progress.finish();

        debug!("{} of {} tile(s) failed", failures, self.tiles.len());
        if failures > 0 {
            return Err(IndexError::GenericError(format!(
                "{} of {} tile(s) failed to load",
                failures,
                self.tiles.len()
            )));
        }
        Ok(())
    }
}
