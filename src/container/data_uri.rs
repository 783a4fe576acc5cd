//! `data:` URI decoding
//!
//! Only the base64 form is supported: `data:<media type>[;params];base64,<data>`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;

use crate::index::errors::{IndexError, IndexResult};

lazy_static! {
    static ref DATA_URI_HEADER: Regex =
        Regex::new(r"^(?i:data):(?P<media>[^;,]*)(?P<params>(?:;[^;,]*)*),").unwrap();
}

/// Decoded contents of a data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Declared media type, without parameters
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Whether `uri` uses the `data:` scheme
pub fn is_data_uri(uri: &str) -> bool {
    uri.get(..5).map_or(false, |scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Decodes a base64 data URI
pub fn decode_data_uri(uri: &str) -> IndexResult<DataUri> {
    let captures = DATA_URI_HEADER
        .captures(uri)
        .ok_or_else(|| IndexError::UnhandledImageUri(abbreviate(uri)))?;

    let header_len = captures.get(0).map_or(0, |m| m.end());
    let media_type = captures.name("media").map_or("", |m| m.as_str()).trim().to_string();
    let is_base64 = captures
        .name("params")
        .map_or(false, |m| m.as_str().split(';').any(|p| p.trim().eq_ignore_ascii_case("base64")));

    if !is_base64 {
        return Err(IndexError::UnhandledImageUri(abbreviate(uri)));
    }

    let data = STANDARD
        .decode(uri[header_len..].trim())
        .map_err(|e| IndexError::SchemaError(format!("Invalid base64 in data URI: {}", e)))?;

    Ok(DataUri { media_type, data })
}

/// Shortens long URIs for diagnostics
pub(crate) fn abbreviate(uri: &str) -> String {
    const LIMIT: usize = 48;
    match uri.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &uri[..cut]),
        None => uri.to_string(),
    }
}
