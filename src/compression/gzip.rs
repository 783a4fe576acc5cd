//! Handler for gzip-wrapped streams

use std::io::Read;
use flate2::read::GzDecoder;
use super::handler::CompressionHandler;

/// Gzip handler used for `.ppmz` and `image/x-portable-pixmap+gzip` rasters
pub struct GzipHandler;

impl CompressionHandler for GzipHandler {
    fn wrap<'a>(&self, reader: Box<dyn Read + 'a>) -> Box<dyn Read + 'a> {
        Box::new(GzDecoder::new(reader))
    }

    fn name(&self) -> &'static str {
        "Gzip"
    }
}
