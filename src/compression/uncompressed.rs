//! Handler for uncompressed streams

use std::io::Read;
use super::handler::CompressionHandler;

/// Pass-through handler for plain raster streams
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn wrap<'a>(&self, reader: Box<dyn Read + 'a>) -> Box<dyn Read + 'a> {
        reader
    }

    fn name(&self) -> &'static str {
        "Uncompressed"
    }
}
