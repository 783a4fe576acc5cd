//! Index map data model
//!
//! This module holds the decoded index raster, the lookup modes callers
//! choose from, and the error type shared by every decoding stage.

pub mod errors;
pub mod map;
pub mod mode;
#[cfg(test)]
mod tests;

pub use errors::{IndexError, IndexResult};
pub use map::{IndexMap, BAND_COUNT};
pub use mode::IndexMode;
