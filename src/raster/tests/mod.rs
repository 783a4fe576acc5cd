mod test_utils;
mod decoder_tests;

pub(crate) use test_utils::{encode_raster, gzip};
