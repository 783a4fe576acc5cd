//! Tests for index modes

extern crate std;

use crate::index::mode::IndexMode;

#[test]
fn test_mode_names_round_trip() {
    for mode in IndexMode::ALL {
        let parsed: IndexMode = mode.name().parse().unwrap();
        std::assert_eq!(parsed, mode);
    }
}

#[test]
fn test_mode_parse_accepts_underscores_and_case() {
    let mode: IndexMode = "External_Raster_Compressed".parse().unwrap();
    std::assert_eq!(mode, IndexMode::ExternalRasterCompressed);
    std::assert!("sideways".parse::<IndexMode>().is_err());
}

#[test]
fn test_mode_flags() {
    std::assert!(IndexMode::None.is_skipped());
    std::assert!(IndexMode::Default.is_skipped());
    std::assert!(!IndexMode::EmbeddedRaster.is_skipped());

    std::assert!(IndexMode::ExternalRasterCompressed.is_compressed());
    std::assert!(IndexMode::EmbeddedRasterCompressed.is_compressed());
    std::assert!(!IndexMode::ExternalRaster.is_compressed());

    std::assert!(IndexMode::EmbeddedRaster.is_embedded());
    std::assert!(!IndexMode::ExternalRaster.is_embedded());
}

#[test]
fn test_default_resolves_to_policy() {
    std::assert_eq!(
        IndexMode::Default.or_policy(IndexMode::EmbeddedRaster),
        IndexMode::EmbeddedRaster
    );
    std::assert_eq!(
        IndexMode::ExternalRaster.or_policy(IndexMode::EmbeddedRaster),
        IndexMode::ExternalRaster
    );
}
