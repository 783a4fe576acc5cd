//! Decoder selection by resource name

use crate::index::errors::{IndexError, IndexResult};
use crate::loader::resolver::file_extension;

/// Which decoder a fetched resource goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `.glb` or `.b3dm`
    BinaryContainer,
    /// `.gltf`
    TextContainer,
    /// `.ppm` or `.ppmz`
    Raster,
}

impl ContainerKind {
    /// Resolves the kind from a file name's extension
    pub fn from_name(name: &str) -> IndexResult<Self> {
        match file_extension(name).as_deref() {
            Some("b3dm") | Some("glb") => Ok(ContainerKind::BinaryContainer),
            Some("gltf") => Ok(ContainerKind::TextContainer),
            Some("ppm") | Some("ppmz") => Ok(ContainerKind::Raster),
            _ => Err(IndexError::UnhandledFileType(name.to_string())),
        }
    }
}
