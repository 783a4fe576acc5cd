//! Model container parsing
//!
//! Index rasters can travel inside a tile's GLB (or b3dm-wrapped GLB)
//! container. This module parses the chunked envelope, models the JSON
//! document just far enough to find the raster image, and hands the raster
//! bytes to the raster decoder.

pub mod decoder;
pub mod document;
pub mod media_type;
pub mod data_uri;
#[cfg(test)]
pub(crate) mod tests;

pub use decoder::ContainerDecoder;
pub use document::{ContainerDocument, EmbeddedRaster, RASTER_IMAGE_INDEX};
pub use media_type::MediaType;
