//! Media types found in container documents

use std::fmt;

/// Media types the container layer recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Binary payload
    OctetStream,
    /// Plain index raster
    Pixmap,
    /// Gzip-compressed index raster
    PixmapGzip,
    /// Accepted, not decoded
    Png,
    /// Accepted, not decoded
    Jpeg,
}

impl MediaType {
    /// Looks up a mime string, ignoring case and parameters
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/octet-stream" => Some(MediaType::OctetStream),
            "image/x-portable-pixmap" => Some(MediaType::Pixmap),
            "image/x-portable-pixmap+gzip" => Some(MediaType::PixmapGzip),
            "image/png" => Some(MediaType::Png),
            "image/jpeg" => Some(MediaType::Jpeg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::OctetStream => "application/octet-stream",
            MediaType::Pixmap => "image/x-portable-pixmap",
            MediaType::PixmapGzip => "image/x-portable-pixmap+gzip",
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }

    /// Whether this type carries an index raster
    pub fn is_index_raster(&self) -> bool {
        matches!(self, MediaType::Pixmap | MediaType::PixmapGzip)
    }

    /// Whether the raster bytes are gzip-wrapped
    pub fn is_compressed(&self) -> bool {
        matches!(self, MediaType::PixmapGzip)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}
