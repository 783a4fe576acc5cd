//! Factory for creating compression handlers

use super::gzip::GzipHandler;
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create the handler for a raster stream's compression flag
    pub fn create_handler(compressed: bool) -> Box<dyn CompressionHandler> {
        if compressed {
            Box::new(GzipHandler)
        } else {
            Box::new(UncompressedHandler)
        }
    }
}
