//! Error types for index map resolution and decoding

use std::fmt;
use std::io;

/// Errors raised while fetching or decoding an index map
#[derive(Debug)]
pub enum IndexError {
    /// I/O error, including transport failures
    IoError(io::Error),
    /// Container stream ended before the declared data
    TruncatedContainer,
    /// Container magic did not match
    InvalidContainerMagic([u8; 4]),
    /// Container version is not supported
    UnsupportedContainerVersion(u32),
    /// Declared container length is inconsistent with its chunks
    ContainerLengthOverrun { declared: u64, required: u64 },
    /// Chunk tag is neither JSON nor BIN
    UnknownChunk([u8; 4]),
    /// A JSON or BIN chunk appeared twice
    DuplicateChunk(&'static str),
    /// Container has no JSON chunk
    MissingJsonChunk,
    /// JSON document could not be deserialized
    JsonError(serde_json::Error),
    /// Document references are missing or invalid
    SchemaError(String),
    /// Image URI is neither a buffer view nor a data URI
    UnhandledImageUri(String),
    /// Image media type is not a raster index type
    UnsupportedMimeType(String),
    /// Raster does not start with the P6 tag
    InvalidRasterMagic(String),
    /// Raster header field is not a positive integer
    InvalidHeaderField { field: &'static str, value: String },
    /// Raster max sample value outside [1, 65535]
    MaxValueOutOfRange(u64),
    /// Raster sample data ended early
    TruncatedSamples { row: usize, col: usize },
    /// Candidate extension does not map to a decoder
    UnhandledFileType(String),
    /// Configuration could not be read
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::IoError(e) => write!(f, "I/O error: {}", e),
            IndexError::TruncatedContainer => write!(f, "Truncated container stream"),
            IndexError::InvalidContainerMagic(m) => {
                write!(f, "Invalid container magic: {:?}", String::from_utf8_lossy(m))
            }
            IndexError::UnsupportedContainerVersion(v) => write!(f, "Unsupported container version: {}", v),
            IndexError::ContainerLengthOverrun { declared, required } => write!(
                f,
                "Container length overrun: declared {} bytes, needs {}",
                declared, required
            ),
            IndexError::UnknownChunk(tag) => write!(f, "Unknown chunk type: {:02x?}", tag),
            IndexError::DuplicateChunk(kind) => write!(f, "Duplicate {} chunk", kind),
            IndexError::MissingJsonChunk => write!(f, "Container has no JSON chunk"),
            IndexError::JsonError(e) => write!(f, "JSON error: {}", e),
            IndexError::SchemaError(msg) => write!(f, "Schema error: {}", msg),
            IndexError::UnhandledImageUri(uri) => write!(f, "Unhandled image URI: {}", uri),
            IndexError::UnsupportedMimeType(mime) => write!(f, "Unsupported mime type: {}", mime),
            IndexError::InvalidRasterMagic(tag) => write!(f, "Invalid raster magic: {:?}", tag),
            IndexError::InvalidHeaderField { field, value } => {
                write!(f, "Invalid raster {}: {:?}", field, value)
            }
            IndexError::MaxValueOutOfRange(v) => write!(f, "Max sample value out of range: {}", v),
            IndexError::TruncatedSamples { row, col } => {
                write!(f, "Truncated sample data at row {}, column {}", row, col)
            }
            IndexError::UnhandledFileType(name) => write!(f, "Unhandled file type: {}", name),
            IndexError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            IndexError::GenericError(msg) => write!(f, "Index error: {}", msg),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::IoError(e) => Some(e),
            IndexError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IndexError {
    fn from(error: io::Error) -> Self {
        IndexError::IoError(error)
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(error: serde_json::Error) -> Self {
        IndexError::JsonError(error)
    }
}

impl From<String> for IndexError {
    fn from(msg: String) -> Self {
        IndexError::GenericError(msg)
    }
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
