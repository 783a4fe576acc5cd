
pub(crate) use test_utils::{build_glb, glb_with_chunks, raster_document};
