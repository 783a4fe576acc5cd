//! Structured-document side of a model container
//!
//! Only the parts needed to find the embedded index raster are modelled:
//! buffers, buffer views and images. Unknown fields are ignored.

use std::borrow::Cow;

use log::debug;
use serde::Deserialize;

use crate::container::data_uri::{abbreviate, decode_data_uri, is_data_uri};
use crate::container::media_type::MediaType;
use crate::index::errors::{IndexError, IndexResult};

/// Image slot that holds the index raster; slot 0 is the tile texture
pub const RASTER_IMAGE_INDEX: usize = 1;

/// A buffer declared by the document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    #[serde(default)]
    pub byte_length: usize,
    pub uri: Option<String>,
}

/// A byte range of a buffer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    #[serde(default)]
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    pub byte_stride: Option<usize>,
}

/// An image entry, stored either in a buffer view or behind a URI
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
}

/// Raster bytes pulled out of a container
#[derive(Debug)]
pub struct EmbeddedRaster<'a> {
    pub bytes: Cow<'a, [u8]>,
    /// Set when the image's own media type says it is gzip-wrapped
    pub compressed: bool,
}

/// The buffers, buffer views and images of a container plus its binary payload
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDocument {
    #[serde(default)]
    pub buffers: Vec<Buffer>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub images: Vec<Image>,
    /// Contents of the binary chunk, standing in for buffer 0
    #[serde(skip)]
    pub payload: Option<Vec<u8>>,
}

impl ContainerDocument {
    /// Builds a document from a binary container's JSON and BIN chunks
    pub fn from_chunks(json: &[u8], payload: Option<Vec<u8>>) -> IndexResult<Self> {
        let mut document: ContainerDocument = serde_json::from_slice(json)?;
        document.payload = payload;
        debug!(
            "Container document: {} buffers, {} buffer views, {} images, payload {} bytes",
            document.buffers.len(),
            document.buffer_views.len(),
            document.images.len(),
            document.payload.as_ref().map_or(0, Vec::len)
        );
        Ok(document)
    }

    /// Builds a document from a text `.gltf` file
    ///
    /// A base64 `data:` URI on buffer 0 becomes the payload, so buffer-view
    /// images work the same way as in binary containers.
    pub fn from_gltf_text(json: &[u8]) -> IndexResult<Self> {
        let mut document = Self::from_chunks(json, None)?;

        let embedded = match document.buffers.first().and_then(|b| b.uri.as_deref()) {
            Some(uri) if is_data_uri(uri) => Some(decode_data_uri(uri)?.data),
            _ => None,
        };
        if let Some(data) = embedded {
            debug!("Using {} bytes from buffer 0 data URI as payload", data.len());
            document.buffers[0].uri = None;
            document.payload = Some(data);
        }

        Ok(document)
    }

    /// Locates the index raster in image slot 1
    pub fn extract_raster(&self) -> IndexResult<EmbeddedRaster<'_>> {
        let image = self.images.get(RASTER_IMAGE_INDEX).ok_or_else(|| {
            IndexError::SchemaError(format!(
                "No image at index {} ({} images declared)",
                RASTER_IMAGE_INDEX,
                self.images.len()
            ))
        })?;

        let (bytes, mime) = match (image.buffer_view, image.mime_type.as_deref()) {
            (Some(view), Some(mime)) => (Cow::Borrowed(self.buffer_view_bytes(view)?), mime.to_string()),
            _ => match image.uri.as_deref() {
                Some(uri) if is_data_uri(uri) => {
                    let decoded = decode_data_uri(uri)?;
                    (Cow::Owned(decoded.data), decoded.media_type)
                }
                Some(uri) => return Err(IndexError::UnhandledImageUri(abbreviate(uri))),
                None => return Err(IndexError::UnhandledImageUri("<missing>".to_string())),
            },
        };

        let media_type = MediaType::from_mime(&mime)
            .filter(MediaType::is_index_raster)
            .ok_or(IndexError::UnsupportedMimeType(mime))?;
        debug!("Index raster: {} bytes of {}", bytes.len(), media_type);

        Ok(EmbeddedRaster {
            bytes,
            compressed: media_type.is_compressed(),
        })
    }

    /// Slices the payload for a buffer view
    fn buffer_view_bytes(&self, index: usize) -> IndexResult<&[u8]> {
        let view = self.buffer_views.get(index).ok_or_else(|| {
            IndexError::SchemaError(format!("Buffer view {} does not exist", index))
        })?;

        if view.buffer != 0 {
            return Err(IndexError::SchemaError(format!(
                "Buffer view {} references buffer {}; only the embedded buffer 0 is supported",
                index, view.buffer
            )));
        }
        let buffer = self.buffers.first().ok_or_else(|| {
            IndexError::SchemaError("Document declares no buffers".to_string())
        })?;
        if let Some(uri) = &buffer.uri {
            return Err(IndexError::SchemaError(format!(
                "External buffer URIs are not supported: {}",
                abbreviate(uri)
            )));
        }
        if let Some(stride) = view.byte_stride.filter(|&s| s > 1) {
            return Err(IndexError::SchemaError(format!(
                "Buffer view {} has unsupported byte stride {}",
                index, stride
            )));
        }

        let payload = self.payload.as_deref().ok_or_else(|| {
            IndexError::SchemaError("Container has no binary payload".to_string())
        })?;
        let end = view
            .byte_offset
            .checked_add(view.byte_length)
            .filter(|&end| end <= payload.len())
            .ok_or_else(|| {
                IndexError::SchemaError(format!(
                    "Buffer view {} ({} + {} bytes) exceeds payload of {} bytes",
                    index,
                    view.byte_offset,
                    view.byte_length,
                    payload.len()
                ))
            })?;

        Ok(&payload[view.byte_offset..end])
    }
}
