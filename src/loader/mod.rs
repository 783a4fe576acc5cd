//! Index map resolution and loading
//!
//! This module turns a tile locator and an index mode into candidate
//! resource names, fetches them through a [`Fetcher`], and dispatches the
//! first available resource to the container or raster decoder.

pub mod fetch;
pub mod kind;
pub mod orchestrator;
pub mod resolver;

pub use fetch::{Fetcher, FileFetcher, MemoryFetcher};
pub use kind::ContainerKind;
pub use orchestrator::{IndexLoadCallback, IndexLoadFailure, IndexLoader};
pub use resolver::CandidateResolver;
