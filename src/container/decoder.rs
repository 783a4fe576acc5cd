//! Chunked binary container (GLB) decoder
//!
//! Layout of a binary container:
//! - 4-byte magic `glTF`
//! - u32 LE version, must be 2
//! - u32 LE total length of the chunk region following these 12 bytes
//! - chunks of `{u32 LE length, 4-byte type, payload}` until the total length
//!
//! Files whose total length also counts the 12-byte header, as glTF 2.0
//! writers produce, end exactly 12 bytes early and are accepted.
//!
//! Exactly one `JSON` chunk and at most one `BIN\0` chunk are allowed.
//! Tiles packaged as b3dm carry a feature/batch table header in front of the
//! GLB; it is skipped.

use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use log::debug;

use crate::container::document::ContainerDocument;
use crate::index::errors::{IndexError, IndexResult};
use crate::index::map::IndexMap;
use crate::raster::RasterDecoder;

pub const GLB_MAGIC: [u8; 4] = *b"glTF";
pub const GLB_VERSION: u32 = 2;
pub const GLB_HEADER_LEN: u64 = 12;
pub const CHUNK_HEADER_LEN: u64 = 8;
pub const CHUNK_JSON: [u8; 4] = *b"JSON";
pub const CHUNK_BIN: [u8; 4] = *b"BIN\0";

pub const B3DM_MAGIC: [u8; 4] = *b"b3dm";
pub const B3DM_VERSION: u32 = 1;
pub const B3DM_HEADER_LEN: u64 = 28;

/// Decodes index rasters embedded in model containers
pub struct ContainerDecoder {
    /// Compression requested by the caller's mode
    compressed: bool,
}

impl ContainerDecoder {
    /// Creates a decoder; `compressed` forces gunzipping the embedded raster
    pub fn new(compressed: bool) -> Self {
        ContainerDecoder { compressed }
    }

    /// Decodes a binary container, bare GLB or b3dm-wrapped
    pub fn decode_binary<R: Read>(&self, reader: &mut R) -> IndexResult<IndexMap> {
        let document = Self::parse_binary(reader)?;
        self.decode_document(&document)
    }

    /// Decodes a text `.gltf` document
    pub fn decode_text<R: Read>(&self, reader: &mut R) -> IndexResult<IndexMap> {
        let mut json = Vec::new();
        reader.read_to_end(&mut json)?;
        let document = ContainerDocument::from_gltf_text(&json)?;
        self.decode_document(&document)
    }

    /// Extracts and decodes the index raster of a parsed document
    pub fn decode_document(&self, document: &ContainerDocument) -> IndexResult<IndexMap> {
        let raster = document.extract_raster()?;
        let compressed = self.compressed || raster.compressed;
        debug!(
            "Decoding embedded raster (mode compressed: {}, image compressed: {})",
            self.compressed, raster.compressed
        );
        RasterDecoder::new(compressed).decode_bytes(&raster.bytes)
    }

    /// Parses a bare GLB or a b3dm tile into its document
    pub fn parse_binary<R: Read>(reader: &mut R) -> IndexResult<ContainerDocument> {
        let magic = read_tag(reader)?;
        match magic {
            GLB_MAGIC => parse_glb_body(reader),
            B3DM_MAGIC => {
                skip_b3dm_header(reader)?;
                let inner = read_tag(reader)?;
                if inner != GLB_MAGIC {
                    return Err(IndexError::InvalidContainerMagic(inner));
                }
                parse_glb_body(reader)
            }
            other => Err(IndexError::InvalidContainerMagic(other)),
        }
    }
}

/// Parses everything after the GLB magic
fn parse_glb_body<R: Read>(reader: &mut R) -> IndexResult<ContainerDocument> {
    let version = read_u32(reader)?;
    if version != GLB_VERSION {
        return Err(IndexError::UnsupportedContainerVersion(version));
    }

    let total = read_u32(reader)? as u64;
    debug!("GLB container version {}, {} chunk bytes", version, total);

    let mut json: Option<Vec<u8>> = None;
    let mut bin: Option<Vec<u8>> = None;
    let mut consumed = 0u64;

    while consumed < total {
        let remaining = total - consumed;
        if remaining < CHUNK_HEADER_LEN {
            return Err(IndexError::ContainerLengthOverrun {
                declared: total,
                required: consumed + CHUNK_HEADER_LEN,
            });
        }

        let mut header = [0u8; CHUNK_HEADER_LEN as usize];
        let read = read_up_to(reader, &mut header)?;
        if read == 0 && remaining == GLB_HEADER_LEN {
            // Writers following glTF 2.0 count the 12-byte header in the total
            debug!("Stream ended {} bytes short of declared length, treating it as header-inclusive", remaining);
            break;
        }
        if read < header.len() {
            return Err(IndexError::TruncatedContainer);
        }
        let length = LittleEndian::read_u32(&header[..4]) as u64;
        let tag = [header[4], header[5], header[6], header[7]];
        consumed += CHUNK_HEADER_LEN;

        let slot = match tag {
            CHUNK_JSON if json.is_some() => return Err(IndexError::DuplicateChunk("JSON")),
            CHUNK_BIN if bin.is_some() => return Err(IndexError::DuplicateChunk("BIN")),
            CHUNK_JSON => &mut json,
            CHUNK_BIN => &mut bin,
            other => return Err(IndexError::UnknownChunk(other)),
        };

        if consumed + length > total {
            return Err(IndexError::ContainerLengthOverrun {
                declared: total,
                required: consumed + length,
            });
        }

        debug!("Chunk {:?}: {} bytes", String::from_utf8_lossy(&tag), length);
        *slot = Some(read_chunk(reader, length)?);
        consumed += length;
    }

    let json = json.ok_or(IndexError::MissingJsonChunk)?;
    ContainerDocument::from_chunks(&json, bin)
}

/// Skips the b3dm header and its feature/batch tables
fn skip_b3dm_header<R: Read>(reader: &mut R) -> IndexResult<()> {
    let version = read_u32(reader)?;
    if version != B3DM_VERSION {
        return Err(IndexError::UnsupportedContainerVersion(version));
    }
    let byte_length = read_u32(reader)? as u64;

    let mut tables = 0u64;
    for _ in 0..4 {
        tables += read_u32(reader)? as u64;
    }
    if B3DM_HEADER_LEN + tables > byte_length {
        return Err(IndexError::ContainerLengthOverrun {
            declared: byte_length,
            required: B3DM_HEADER_LEN + tables,
        });
    }
    debug!("b3dm tile, {} bytes, skipping {} table bytes", byte_length, tables);

    let skipped = io::copy(&mut reader.by_ref().take(tables), &mut io::sink())?;
    if skipped != tables {
        return Err(IndexError::TruncatedContainer);
    }
    Ok(())
}

fn read_chunk<R: Read>(reader: &mut R, length: u64) -> IndexResult<Vec<u8>> {
    let mut data = Vec::new();
    reader.by_ref().take(length).read_to_end(&mut data)?;
    if data.len() as u64 != length {
        return Err(IndexError::TruncatedContainer);
    }
    Ok(data)
}

/// Reads until `buf` is full or the stream ends, returning the byte count
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> IndexResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(IndexError::IoError(e)),
        }
    }
    Ok(filled)
}

fn read_tag<R: Read>(reader: &mut R) -> IndexResult<[u8; 4]> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag).map_err(truncated)?;
    Ok(tag)
}

fn read_u32<R: Read>(reader: &mut R) -> IndexResult<u32> {
    reader.read_u32::<LittleEndian>().map_err(truncated)
}

fn truncated(error: io::Error) -> IndexError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        IndexError::TruncatedContainer
    } else {
        IndexError::IoError(error)
    }
}
