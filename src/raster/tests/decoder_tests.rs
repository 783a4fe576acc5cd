//! Tests for the raster decoder

extern crate std;

use crate::index::errors::IndexError;
use crate::raster::decoder::RasterDecoder;
use super::{encode_raster, gzip};

fn synthetic_samples(width: usize, height: usize, scale: u32) -> Vec<u32> {
    let mut samples = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            // leave every third pixel unmapped so band 0 has zeros
            let id = if (row * width + col) % 3 == 0 { 0 } else { (col as u32 + 1) * scale };
            samples.push(id);
            samples.push(row as u32 * scale);
            samples.push(col as u32 * scale);
        }
    }
    samples
}

fn assert_matches_samples(map: &crate::index::IndexMap, samples: &[u32]) {
    for row in 0..map.height() {
        for col in 0..map.width() {
            let base = (row * map.width() + col) * 3;
            std::assert_eq!(map.get_pixel(row, col), [samples[base], samples[base + 1], samples[base + 2]]);
        }
    }
}

#[test]
fn test_decode_eight_bit_raster() {
    let samples = synthetic_samples(5, 4, 10);
    let data = encode_raster(5, 4, 255, &samples);

    let map = RasterDecoder::new(false).decode_bytes(&data).unwrap();
    std::assert_eq!(map.width(), 5);
    std::assert_eq!(map.height(), 4);
    assert_matches_samples(&map, &samples);

    let expected = samples.chunks(3).filter(|px| px[0] != 0).count();
    std::assert_eq!(map.num_nonzero(), expected);
    std::assert_eq!(map.num_nonzero(), expected);
}

#[test]
fn test_decode_sixteen_bit_raster_is_big_endian() {
    let samples = synthetic_samples(3, 2, 1000);
    let data = encode_raster(3, 2, 65535, &samples);

    let map = RasterDecoder::new(false).decode_bytes(&data).unwrap();
    assert_matches_samples(&map, &samples);

    // P6 1 1 256 with 0x0102 decodes as 258
    let mut raw = b"P6 1 1 256\n".to_vec();
    raw.extend_from_slice(&[0x01, 0x02, 0x00, 0x00, 0x00, 0x03]);
    let map = RasterDecoder::new(false).decode_bytes(&raw).unwrap();
    std::assert_eq!(map.get_pixel(0, 0), [258, 0, 3]);
}

#[test]
fn test_decode_gzip_raster() {
    let samples = synthetic_samples(6, 3, 7);
    let data = gzip(&encode_raster(6, 3, 255, &samples));

    let map = RasterDecoder::new(true).decode_bytes(&data).unwrap();
    assert_matches_samples(&map, &samples);
}

#[test]
fn test_compressed_flag_rejects_plain_stream() {
    let data = encode_raster(1, 1, 255, &[1, 2, 3]);
    std::assert!(RasterDecoder::new(true).decode_bytes(&data).is_err());
}

#[test]
fn test_header_comments_and_whitespace() {
    let mut data = b"P6\n# generated index\n  2\t1 # trailing\n255\n".to_vec();
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);

    let map = RasterDecoder::new(false).decode_bytes(&data).unwrap();
    std::assert_eq!(map.get_pixel(0, 1), [4, 5, 6]);
}

#[test]
fn test_binary_data_may_start_with_whitespace_byte() {
    // exactly one byte after max value is consumed; 0x20 and 0x0a are samples
    let mut data = b"P6 1 1 255\n".to_vec();
    data.extend_from_slice(&[b' ', b'\n', 9]);

    let map = RasterDecoder::new(false).decode_bytes(&data).unwrap();
    std::assert_eq!(map.get_pixel(0, 0), [0x20, 0x0a, 9]);
}

#[test]
fn test_bad_magic() {
    let data = b"P3 1 1 255\n1 2 3".to_vec();
    match RasterDecoder::new(false).decode_bytes(&data) {
        Err(IndexError::InvalidRasterMagic(tag)) => std::assert_eq!(tag, "P3"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_empty_stream_is_bad_magic() {
    std::assert!(matches!(
        RasterDecoder::new(false).decode_bytes(&[]),
        Err(IndexError::InvalidRasterMagic(_))
    ));
}

#[test]
fn test_invalid_dimensions() {
    for header in ["P6 0 1 255\n", "P6 x 1 255\n", "P6 1 -2 255\n"] {
        let result = RasterDecoder::new(false).decode_bytes(header.as_bytes());
        std::assert!(
            matches!(result, Err(IndexError::InvalidHeaderField { .. })),
            "header {:?} gave {:?}",
            header,
            result
        );
    }
}

#[test]
fn test_max_value_out_of_range() {
    for (header, value) in [("P6 1 1 0\n", 0), ("P6 1 1 65536\n", 65536)] {
        match RasterDecoder::new(false).decode_bytes(header.as_bytes()) {
            Err(IndexError::MaxValueOutOfRange(v)) => std::assert_eq!(v, value),
            other => panic!("unexpected result for {:?}: {:?}", header, other),
        }
    }
}

#[test]
fn test_truncated_samples_report_position() {
    let samples = synthetic_samples(4, 3, 1);
    let mut data = encode_raster(4, 3, 255, &samples);
    // drop the last pixel and a half: row 2, column 2 cannot be read
    data.truncate(data.len() - 5);

    let err = RasterDecoder::new(false).decode_bytes(&data).unwrap_err();
    match err {
        IndexError::TruncatedSamples { row, col } => {
            std::assert_eq!((row, col), (2, 2));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    std::assert!(err_message(&data).contains("row 2, column 2"));
}

fn err_message(data: &[u8]) -> String {
    RasterDecoder::new(false).decode_bytes(data).unwrap_err().to_string()
}

#[test]
fn test_overflowing_dimensions_are_header_errors() {
    let data = b"P6 4294967296 2147483648 255\n\x01\x02\x03";
    match RasterDecoder::new(false).decode_bytes(data) {
        Err(IndexError::InvalidHeaderField { field, value }) => {
            std::assert_eq!(field, "dimensions");
            std::assert_eq!(value, "4294967296x2147483648");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_huge_dimensions_with_little_data_are_truncated() {
    let data = b"P6 1000000 1000000 255\n\x01\x02\x03";
    match RasterDecoder::new(false).decode_bytes(data) {
        Err(IndexError::TruncatedSamples { row, col }) => std::assert_eq!((row, col), (0, 1)),
        other => panic!("unexpected result: {:?}", other),
    }
}
