//! Compression handling for raster streams
//!
//! Index rasters may arrive gzip-wrapped; handlers wrap a reader so the
//! raster decoder always sees plain bytes.

mod handler;
mod uncompressed;
mod gzip;
mod factory;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use gzip::GzipHandler;
pub use factory::CompressionFactory;
