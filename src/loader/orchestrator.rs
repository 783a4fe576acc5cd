//! Index map loading
//!
//! The loader walks the candidate list for a tile strictly in order. Fetch
//! failures and empty streams move on to the next candidate; the first
//! non-empty stream is decoded and its outcome is final. Decode errors are
//! reported as a load failure, never propagated as panics.

use std::fmt;
use std::io::{BufRead, BufReader, Read};

use log::{debug, info, warn};

use crate::container::ContainerDecoder;
use crate::index::errors::IndexResult;
use crate::index::map::IndexMap;
use crate::index::mode::IndexMode;
use crate::loader::fetch::Fetcher;
use crate::loader::kind::ContainerKind;
use crate::loader::resolver::CandidateResolver;
use crate::raster::RasterDecoder;

/// Why an index map could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLoadFailure {
    pub mode: IndexMode,
    /// Tile locator as given by the caller
    pub locator: String,
    pub message: String,
}

impl fmt::Display for IndexLoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load {} index for {}: {}",
            self.mode, self.locator, self.message
        )
    }
}

impl std::error::Error for IndexLoadFailure {}

/// Receives the outcome of a load; exactly one method is called per load
pub trait IndexLoadCallback {
    /// Called with the map, or `None` when the mode skips decoding
    fn on_success(&mut self, map: Option<IndexMap>);

    /// Called with the request's mode and locator and a diagnostic
    fn on_fail(&mut self, mode: IndexMode, locator: &str, message: &str);
}

/// Drives candidate resolution, fetching and decoding for one tile at a time
pub struct IndexLoader<'a> {
    fetcher: &'a mut dyn Fetcher,
}

impl<'a> IndexLoader<'a> {
    pub fn new(fetcher: &'a mut dyn Fetcher) -> Self {
        IndexLoader { fetcher }
    }

    /// Loads the index map of the tile at `locator`
    ///
    /// `None` and `Default` modes succeed immediately with no map.
    pub fn load(&mut self, mode: IndexMode, locator: &str) -> Result<Option<IndexMap>, IndexLoadFailure> {
        let failure = |message: String| IndexLoadFailure {
            mode,
            locator: locator.to_string(),
            message,
        };

        if mode.is_skipped() {
            debug!("Index mode {} for {}, skipping", mode, locator);
            return Ok(None);
        }

        let candidates = CandidateResolver::candidates(mode, locator);
        let mut last_error: Option<String> = None;

        for candidate in &candidates {
            let target = CandidateResolver::sibling(locator, candidate);
            debug!("Trying index candidate {}", target);

            let mut stream = match self.fetcher.fetch(&target) {
                Ok(stream) => BufReader::new(stream),
                Err(e) => {
                    warn!("Fetching {} failed: {}", target, e);
                    last_error = Some(format!("{}: {}", target, e));
                    continue;
                }
            };

            match stream.fill_buf() {
                Ok(buf) if !buf.is_empty() => {}
                Ok(_) => {
                    warn!("Fetching {} returned an empty stream", target);
                    last_error = Some(format!("{}: empty stream", target));
                    continue;
                }
                Err(e) => {
                    warn!("Reading {} failed: {}", target, e);
                    last_error = Some(format!("{}: {}", target, e));
                    continue;
                }
            }

            return match decode_candidate(mode, candidate, stream) {
                Ok(map) => {
                    info!("Loaded index map for {} from {}: {}", locator, candidate, map);
                    Ok(Some(map))
                }
                Err(e) => {
                    warn!("Decoding {} failed: {}", candidate, e);
                    Err(failure(format!("{}: {}", candidate, e)))
                }
            };
        }

        let message = match last_error {
            Some(error) => format!(
                "no index resource found after {} candidate(s); last error: {}",
                candidates.len(),
                error
            ),
            None => format!("no index resource found after {} candidate(s)", candidates.len()),
        };
        warn!("{}: {}", locator, message);
        Err(failure(message))
    }

    /// Loads the index map and reports the outcome through `callback`
    pub fn load_with(&mut self, mode: IndexMode, locator: &str, callback: &mut dyn IndexLoadCallback) {
        match self.load(mode, locator) {
            Ok(map) => callback.on_success(map),
            Err(failure) => callback.on_fail(failure.mode, &failure.locator, &failure.message),
        }
    }
}

/// Decodes a fetched candidate with the decoder its extension selects
fn decode_candidate<R: Read>(mode: IndexMode, candidate: &str, mut stream: R) -> IndexResult<IndexMap> {
    let compressed = mode.is_compressed();
    match ContainerKind::from_name(candidate)? {
        ContainerKind::BinaryContainer => ContainerDecoder::new(compressed).decode_binary(&mut stream),
        ContainerKind::TextContainer => ContainerDecoder::new(compressed).decode_text(&mut stream),
        ContainerKind::Raster => RasterDecoder::new(compressed).decode(Box::new(stream)),
    }
}
