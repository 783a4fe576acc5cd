//! Decoded index map raster

use std::fmt;
use std::sync::OnceLock;

/// Number of bands in an index map
pub const BAND_COUNT: usize = 3;

/// A 3-band raster mapping tile texels to pixels of an external image
///
/// Each pixel carries `{source image id, row, column}` in bands 0, 1 and 2.
/// Samples are stored per band in `row * width + col` order.
#[derive(Debug, Clone)]
pub struct IndexMap {
    width: usize,
    height: usize,
    bands: [Vec<u32>; BAND_COUNT],
    /// Cached count of non-zero band 0 samples
    num_nonzero: OnceLock<usize>,
}

impl IndexMap {
    /// Creates a zero-filled index map of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        IndexMap {
            width,
            height,
            bands: [vec![0; len], vec![0; len], vec![0; len]],
            num_nonzero: OnceLock::new(),
        }
    }

    /// Wraps fully decoded bands, each `width * height` samples long
    pub(crate) fn from_bands(width: usize, height: usize, bands: [Vec<u32>; BAND_COUNT]) -> Self {
        debug_assert!(bands.iter().all(|band| band.len() == width * height));
        IndexMap {
            width,
            height,
            bands,
            num_nonzero: OnceLock::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reads a sample
    ///
    /// Panics if `band`, `row` or `col` is out of range.
    pub fn get(&self, band: usize, row: usize, col: usize) -> u32 {
        self.bands[band][self.offset(row, col)]
    }

    /// Writes a sample
    ///
    /// Panics if `band`, `row` or `col` is out of range.
    pub fn set(&mut self, band: usize, row: usize, col: usize, value: u32) {
        let offset = self.offset(row, col);
        self.bands[band][offset] = value;
        if band == 0 {
            self.num_nonzero.take();
        }
    }

    /// Returns all three bands of one pixel
    pub fn get_pixel(&self, row: usize, col: usize) -> [u32; BAND_COUNT] {
        let offset = self.offset(row, col);
        [self.bands[0][offset], self.bands[1][offset], self.bands[2][offset]]
    }

    /// Returns one band as a flat slice
    pub fn band(&self, band: usize) -> &[u32] {
        &self.bands[band]
    }

    /// Number of non-zero samples in band 0, computed once and cached
    pub fn num_nonzero(&self) -> usize {
        *self
            .num_nonzero
            .get_or_init(|| self.bands[0].iter().filter(|&&v| v != 0).count())
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({}, {}) outside {}x{} index map",
            row,
            col,
            self.width,
            self.height
        );
        row * self.width + col
    }
}

impl fmt::Display for IndexMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexMap {}x{} ({} non-zero)",
            self.width,
            self.height,
            self.num_nonzero()
        )
    }
}
