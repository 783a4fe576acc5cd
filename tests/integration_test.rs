//! End-to-end tests for index map loading

extern crate std;

use std::fs;
use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::json;

use tileindex::{
    CandidateResolver, FileFetcher, IndexLoadCallback, IndexLoader, IndexMap, IndexMode,
    MemoryFetcher,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn encode_raster(width: usize, height: usize, max_value: u16, samples: &[u32]) -> Vec<u8> {
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

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// GLB whose image 1 holds `raster` with the given mime type
fn glb_with_raster(raster: &[u8], mime: &str) -> Vec<u8> {
    let png_stub = b"png\0";
    let document = json!({
        "asset": { "version": "2.0" },
        "buffers": [ { "byteLength": png_stub.len() + raster.len() } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": png_stub.len() },
            { "buffer": 0, "byteOffset": png_stub.len(), "byteLength": raster.len() }
        ],
        "images": [
            { "bufferView": 0, "mimeType": "image/png" },
            { "bufferView": 1, "mimeType": mime }
        ]
    });

    let mut json = serde_json::to_vec(&document).unwrap();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = png_stub.to_vec();
    bin.extend_from_slice(raster);
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"glTF");
    buffer.write_u32::<LittleEndian>(2).unwrap();
    buffer.write_u32::<LittleEndian>((8 + json.len() + 8 + bin.len()) as u32).unwrap();
    buffer.write_u32::<LittleEndian>(json.len() as u32).unwrap();
    buffer.extend_from_slice(b"JSON");
    buffer.extend_from_slice(&json);
    buffer.write_u32::<LittleEndian>(bin.len() as u32).unwrap();
    buffer.extend_from_slice(b"BIN\0");
    buffer.extend_from_slice(&bin);
    buffer
}

#[derive(Default)]
struct Outcomes {
    successes: Vec<Option<IndexMap>>,
    failures: Vec<(IndexMode, String, String)>,
}

impl IndexLoadCallback for Outcomes {
    fn on_success(&mut self, map: Option<IndexMap>) {
        self.successes.push(map);
    }

    fn on_fail(&mut self, mode: IndexMode, locator: &str, message: &str) {
        self.failures.push((mode, locator.to_string(), message.to_string()));
    }
}

#[test]
fn test_candidate_order_for_external_rasters() {
    let plain = CandidateResolver::candidates(IndexMode::ExternalRaster, "tiles/foo.b3dm");
    std::assert_eq!(plain, ["foo.ppm", "foo_index.ppm"]);

    let compressed = CandidateResolver::candidates(IndexMode::ExternalRasterCompressed, "tiles/foo.b3dm");
    std::assert_eq!(compressed, ["foo.ppmz", "foo_index.ppmz"]);
    std::assert_eq!(CandidateResolver::sibling("tiles/foo.b3dm", &compressed[1]), "tiles/foo_index.ppmz");
}

#[test]
fn test_external_raster_falls_back_to_index_name() {
    init_logging();
    let samples = [1, 2, 3, 0, 0, 0, 4, 5, 6, 7, 8, 9];
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("tiles/foo_index.ppm", encode_raster(2, 2, 255, &samples));

    let map = IndexLoader::new(&mut fetcher)
        .load(IndexMode::ExternalRaster, "tiles/foo.b3dm")
        .unwrap()
        .unwrap();

    std::assert_eq!((map.width(), map.height()), (2, 2));
    std::assert_eq!(map.get_pixel(0, 0), [1, 2, 3]);
    std::assert_eq!(map.get_pixel(1, 1), [7, 8, 9]);
    std::assert_eq!(map.num_nonzero(), 3);
    std::assert_eq!(fetcher.requests(), ["tiles/foo.ppm", "tiles/foo_index.ppm"]);
}

#[test]
fn test_compressed_sixteen_bit_raster() {
    init_logging();
    let samples = [65535, 300, 1];
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("foo.ppmz", gzip(&encode_raster(1, 1, 65535, &samples)));

    let map = IndexLoader::new(&mut fetcher)
        .load(IndexMode::ExternalRasterCompressed, "foo.glb")
        .unwrap()
        .unwrap();

    std::assert_eq!(map.get_pixel(0, 0), [65535, 300, 1]);
    std::assert_eq!(fetcher.requests(), ["foo.ppmz"]);
}

#[test]
fn test_embedded_raster_with_gzip_mime() {
    init_logging();
    let raster = gzip(&encode_raster(1, 2, 255, &[5, 0, 0, 0, 0, 0]));
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("tiles/a.glb", glb_with_raster(&raster, "image/x-portable-pixmap+gzip"));

    // The mime type alone selects decompression
    let map = IndexLoader::new(&mut fetcher)
        .load(IndexMode::EmbeddedRaster, "tiles/a.glb")
        .unwrap()
        .unwrap();

    std::assert_eq!((map.width(), map.height()), (1, 2));
    std::assert_eq!(map.get(0, 0, 0), 5);
    std::assert_eq!(map.num_nonzero(), 1);
}

#[test]
fn test_unreachable_candidates_fail_once() {
    init_logging();
    let mut fetcher = MemoryFetcher::new();
    let mut outcomes = Outcomes::default();

    IndexLoader::new(&mut fetcher).load_with(IndexMode::ExternalRaster, "tiles/foo.b3dm", &mut outcomes);

    std::assert!(outcomes.successes.is_empty());
    std::assert_eq!(outcomes.failures.len(), 1);
    let (mode, locator, message) = &outcomes.failures[0];
    std::assert_eq!(*mode, IndexMode::ExternalRaster);
    std::assert_eq!(locator, "tiles/foo.b3dm");
    std::assert!(message.contains("tiles/foo_index.ppm"));
}

#[test]
fn test_skipped_modes_never_fetch() {
    let mut fetcher = MemoryFetcher::new();
    let mut outcomes = Outcomes::default();
    {
        let mut loader = IndexLoader::new(&mut fetcher);
        loader.load_with(IndexMode::None, "foo.glb", &mut outcomes);
        loader.load_with(IndexMode::Default, "foo.glb", &mut outcomes);
    }

    std::assert_eq!(outcomes.successes.len(), 2);
    std::assert!(outcomes.successes.iter().all(Option::is_none));
    std::assert!(fetcher.requests().is_empty());
}

#[test]
fn test_file_fetcher_end_to_end() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("tiles")).unwrap();
    fs::write(dir.path().join("tiles/foo.ppm"), encode_raster(1, 1, 255, &[9, 8, 7])).unwrap();

    let mut fetcher = FileFetcher::new(dir.path());
    let map = IndexLoader::new(&mut fetcher)
        .load(IndexMode::ExternalRaster, "tiles/foo.b3dm")
        .unwrap()
        .unwrap();
    std::assert_eq!(map.get_pixel(0, 0), [9, 8, 7]);
}
