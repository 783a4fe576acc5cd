//! Binary PPM (P6) index raster decoder
//!
//! Samples are band-interleaved in row-major order. Rasters with a max
//! value below 256 use one byte per sample; wider rasters use two bytes
//! in big-endian order, as the netpbm format defines.

use std::io::{self, BufRead, BufReader, Read};

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::compression::CompressionFactory;
use crate::index::errors::{IndexError, IndexResult};
use crate::index::map::{IndexMap, BAND_COUNT};
use crate::raster::tokenizer::HeaderTokenizer;

/// Magic token of a binary pixmap
pub const RASTER_MAGIC: &str = "P6";

/// Largest max sample value the format allows
pub const MAX_SAMPLE_VALUE: u64 = 65535;

/// Parsed raster header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterHeader {
    pub width: usize,
    pub height: usize,
    pub max_value: u16,
}

impl RasterHeader {
    /// Bytes used by one sample
    pub fn bytes_per_sample(&self) -> usize {
        if self.max_value < 256 {
            1
        } else {
            2
        }
    }
}

/// Decoder for index rasters, optionally gzip-wrapped
pub struct RasterDecoder {
    compressed: bool,
}

impl RasterDecoder {
    /// Creates a decoder; `compressed` gunzips the stream before parsing
    pub fn new(compressed: bool) -> Self {
        RasterDecoder { compressed }
    }

    /// Decodes an in-memory raster
    pub fn decode_bytes(&self, data: &[u8]) -> IndexResult<IndexMap> {
        self.decode(Box::new(data))
    }

    /// Decodes a raster from a stream
    pub fn decode<'a>(&self, reader: Box<dyn Read + 'a>) -> IndexResult<IndexMap> {
        let handler = CompressionFactory::create_handler(self.compressed);
        debug!("Decoding raster ({})", handler.name());

        let mut tokenizer = HeaderTokenizer::new(BufReader::new(handler.wrap(reader)));
        let header = read_header(&mut tokenizer)?;
        debug!(
            "Raster header: {}x{}, max value {}",
            header.width, header.height, header.max_value
        );

        let mut reader = tokenizer.into_inner();
        read_samples(&mut reader, &header)
    }
}

fn read_header<R: BufRead>(tokenizer: &mut HeaderTokenizer<R>) -> IndexResult<RasterHeader> {
    let magic = tokenizer.next_token()?.unwrap_or_default();
    if magic != RASTER_MAGIC {
        return Err(IndexError::InvalidRasterMagic(magic));
    }

    let width = read_positive(tokenizer, "width")?;
    let height = read_positive(tokenizer, "height")?;
    let max_value = read_positive(tokenizer, "max value")?;
    if max_value > MAX_SAMPLE_VALUE {
        return Err(IndexError::MaxValueOutOfRange(max_value));
    }

    let to_usize = |field: &'static str, value: u64| {
        usize::try_from(value).map_err(|_| IndexError::InvalidHeaderField {
            field,
            value: value.to_string(),
        })
    };

    Ok(RasterHeader {
        width: to_usize("width", width)?,
        height: to_usize("height", height)?,
        max_value: max_value as u16,
    })
}

fn read_positive<R: BufRead>(
    tokenizer: &mut HeaderTokenizer<R>,
    field: &'static str,
) -> IndexResult<u64> {
    let token = tokenizer.next_token()?.unwrap_or_default();
    match token.parse::<u64>() {
        Ok(0) if field == "max value" => Err(IndexError::MaxValueOutOfRange(0)),
        Ok(value) if value > 0 => Ok(value),
        _ => Err(IndexError::InvalidHeaderField { field, value: token }),
    }
}

/// Upper bound on sample storage reserved before any data is read
const INITIAL_PIXEL_CAPACITY: usize = 1 << 16;

fn read_samples<R: Read>(reader: &mut R, header: &RasterHeader) -> IndexResult<IndexMap> {
    let bytes_per_sample = header.bytes_per_sample();
    let pixel_count = header.width.checked_mul(header.height);
    let sample_bytes = pixel_count
        .and_then(|pixels| pixels.checked_mul(BAND_COUNT))
        .and_then(|samples| samples.checked_mul(bytes_per_sample));
    let pixel_count = match (pixel_count, sample_bytes) {
        (Some(pixels), Some(_)) => pixels,
        _ => {
            return Err(IndexError::InvalidHeaderField {
                field: "dimensions",
                value: format!("{}x{}", header.width, header.height),
            })
        }
    };
    debug!("Reading {} pixels", pixel_count);

    // Storage grows with the data actually read, never from the header alone
    let capacity = pixel_count.min(INITIAL_PIXEL_CAPACITY);
    let mut bands: [Vec<u32>; BAND_COUNT] = [
        Vec::with_capacity(capacity),
        Vec::with_capacity(capacity),
        Vec::with_capacity(capacity),
    ];

    let pixel_len = BAND_COUNT * bytes_per_sample;
    let mut pixel = [0u8; BAND_COUNT * 2];

    for row in 0..header.height {
        for col in 0..header.width {
            match reader.read_exact(&mut pixel[..pixel_len]) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(IndexError::TruncatedSamples { row, col });
                }
                Err(e) => return Err(IndexError::IoError(e)),
            }

            for (band, samples) in bands.iter_mut().enumerate() {
                let start = band * bytes_per_sample;
                let value = if bytes_per_sample == 1 {
                    pixel[start] as u32
                } else {
                    BigEndian::read_u16(&pixel[start..start + 2]) as u32
                };
                samples.push(value);
            }
        }
    }

    Ok(IndexMap::from_bands(header.width, header.height, bands))
}
