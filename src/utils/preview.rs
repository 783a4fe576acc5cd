//! Grayscale previews of index maps
//!
//! Band 0 (the source image id) is scaled to 8 bits so that mapped and
//! unmapped texels can be told apart at a glance.

use image::{GrayImage, Luma};
use log::info;

use crate::index::errors::{IndexError, IndexResult};
use crate::index::map::IndexMap;

/// Renders band 0 as an 8-bit grayscale image
pub fn render_band_zero(map: &IndexMap) -> IndexResult<GrayImage> {
    let width = u32::try_from(map.width())
        .map_err(|_| IndexError::GenericError(format!("Width {} too large for preview", map.width())))?;
    let height = u32::try_from(map.height())
        .map_err(|_| IndexError::GenericError(format!("Height {} too large for preview", map.height())))?;

    let max = map.band(0).iter().copied().max().unwrap_or(0).max(1) as u64;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let value = map.get(0, y as usize, x as usize) as u64;
        Luma([(value * 255 / max) as u8])
    }))
}

/// Writes a band 0 preview PNG
pub fn save_preview(map: &IndexMap, path: &str) -> IndexResult<()> {
    let image = render_band_zero(map)?;
    image
        .save(path)
        .map_err(|e| IndexError::GenericError(format!("Failed to write preview {}: {}", path, e)))?;
    info!("Wrote index preview to {}", path);
    Ok(())
}
