use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Encodes band-interleaved samples as a P6 raster
pub(crate) fn encode_raster(width: usize, height: usize, max_value: u16, samples: &[u32]) -> Vec<u8> {
    assert_eq!(samples.len(), width * height * 3);

    let mut buffer = format!("P6\n{} {}\n{}\n", width, height, max_value).into_bytes();
    for &sample in samples {
        if max_value < 256 {
            buffer.push(sample as u8);
        } else {
            buffer.write_u16::<BigEndian>(sample as u16).unwrap();
        }
    }
    buffer
}

/// Gzips a byte buffer
pub(crate) fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
