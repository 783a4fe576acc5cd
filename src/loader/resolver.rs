//! Candidate resource names for a tile's index map

use crate::index::mode::IndexMode;

/// Extension of a plain index raster
pub const RASTER_EXTENSION: &str = "ppm";
/// Extension of a gzip-compressed index raster
pub const COMPRESSED_RASTER_EXTENSION: &str = "ppmz";
/// Suffix of the fallback raster name
pub const INDEX_SUFFIX: &str = "_index";

/// Generates the ordered resource names to try for a tile
///
/// Pure: no I/O happens here.
pub struct CandidateResolver;

impl CandidateResolver {
    /// Names to fetch, in order, for `mode` and the tile at `locator`
    ///
    /// Empty for `None` and `Default`, where decoding is skipped.
    pub fn candidates(mode: IndexMode, locator: &str) -> Vec<String> {
        let (_, file_name) = split_locator(locator);
        let stem = file_stem(file_name);

        match mode {
            IndexMode::None | IndexMode::Default => Vec::new(),
            IndexMode::ExternalRaster => raster_candidates(stem, RASTER_EXTENSION),
            IndexMode::ExternalRasterCompressed => raster_candidates(stem, COMPRESSED_RASTER_EXTENSION),
            IndexMode::EmbeddedRaster | IndexMode::EmbeddedRasterCompressed => vec![file_name.to_string()],
        }
    }

    /// Resolves a candidate name against the tile's directory
    pub fn sibling(locator: &str, candidate: &str) -> String {
        let (directory, _) = split_locator(locator);
        format!("{}{}", directory, candidate)
    }
}

fn raster_candidates(stem: &str, extension: &str) -> Vec<String> {
    vec![
        format!("{}.{}", stem, extension),
        format!("{}{}.{}", stem, INDEX_SUFFIX, extension),
    ]
}

/// Splits a locator into its directory (with trailing `/`) and file name,
/// ignoring any query or fragment
pub fn split_locator(locator: &str) -> (&str, &str) {
    let path = locator
        .find(|c| c == '?' || c == '#')
        .map_or(locator, |end| &locator[..end]);
    match path.rfind('/') {
        Some(slash) => (&path[..=slash], &path[slash + 1..]),
        None => ("", path),
    }
}

/// File name without its last extension
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    }
}

/// Lower-cased last extension of a file name, if any
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, name) = split_locator(file_name);
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => Some(name[dot + 1..].to_lowercase()),
        _ => None,
    }
}
