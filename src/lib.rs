pub mod index;
pub mod raster;
pub mod compression;
pub mod container;
pub mod loader;
pub mod config;
pub mod utils;
pub mod commands;

pub use index::{IndexError, IndexMap, IndexMode, IndexResult};
pub use loader::{CandidateResolver, Fetcher, FileFetcher, IndexLoadCallback, IndexLoadFailure, IndexLoader, MemoryFetcher};
pub use container::ContainerDecoder;
pub use raster::RasterDecoder;
pub use config::LoaderConfig;
