//! Stream decompression handler trait definition

use std::io::Read;

/// Strategy trait for unwrapping a compressed byte stream
pub trait CompressionHandler: Send + Sync {
    /// Wraps `reader` so that reads yield decompressed bytes
    fn wrap<'a>(&self, reader: Box<dyn Read + 'a>) -> Box<dyn Read + 'a>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;
}
