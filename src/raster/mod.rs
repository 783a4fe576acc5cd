//! Index raster format parsing
//!
//! This module reads the binary netpbm pixmap (`P6`) that carries index
//! maps, with an optional outer gzip layer.

pub mod decoder;
mod tokenizer;
#[cfg(test)]
pub(crate) mod tests;

pub use decoder::{RasterDecoder, RasterHeader, MAX_SAMPLE_VALUE, RASTER_MAGIC};
