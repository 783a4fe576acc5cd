//! Index lookup modes

use std::fmt;
use std::str::FromStr;

use crate::index::errors::IndexError;

/// Where, and in which encoding, a tile's index map is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// No index map
    None,
    /// Defer to the caller's policy
    Default,
    /// Standalone `.ppm` beside the tile
    ExternalRaster,
    /// Standalone gzip-compressed `.ppmz` beside the tile
    ExternalRasterCompressed,
    /// Raster embedded in the tile container
    EmbeddedRaster,
    /// Gzip-compressed raster embedded in the tile container
    EmbeddedRasterCompressed,
}

impl IndexMode {
    pub const ALL: [IndexMode; 6] = [
        IndexMode::None,
        IndexMode::Default,
        IndexMode::ExternalRaster,
        IndexMode::ExternalRasterCompressed,
        IndexMode::EmbeddedRaster,
        IndexMode::EmbeddedRasterCompressed,
    ];

    /// Whether decoding is skipped entirely
    pub fn is_skipped(&self) -> bool {
        matches!(self, IndexMode::None | IndexMode::Default)
    }

    /// Whether the raster stream must be gunzipped
    pub fn is_compressed(&self) -> bool {
        matches!(
            self,
            IndexMode::ExternalRasterCompressed | IndexMode::EmbeddedRasterCompressed
        )
    }

    /// Whether the raster lives inside the tile container
    pub fn is_embedded(&self) -> bool {
        matches!(
            self,
            IndexMode::EmbeddedRaster | IndexMode::EmbeddedRasterCompressed
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndexMode::None => "none",
            IndexMode::Default => "default",
            IndexMode::ExternalRaster => "external-raster",
            IndexMode::ExternalRasterCompressed => "external-raster-compressed",
            IndexMode::EmbeddedRaster => "embedded-raster",
            IndexMode::EmbeddedRasterCompressed => "embedded-raster-compressed",
        }
    }

    /// Resolves `Default` to the given policy, leaving other modes alone
    pub fn or_policy(self, policy: IndexMode) -> IndexMode {
        match self {
            IndexMode::Default => policy,
            other => other,
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexMode {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        IndexMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| IndexError::GenericError(format!("Unknown index mode: {}", s)))
    }
}
