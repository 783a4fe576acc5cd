//! Transport seam for fetching candidate resources
//!
//! The loader never touches the network or filesystem itself; it asks a
//! [`Fetcher`] for a byte stream per candidate. Streams are dropped as soon
//! as the candidate has been decoded or rejected.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Component, Path, PathBuf};

use log::debug;

/// Source of resource bytes
pub trait Fetcher {
    /// Opens the resource at `locator`
    fn fetch(&mut self, locator: &str) -> io::Result<Box<dyn Read>>;
}

/// Fetches resources from files below a root directory
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FileFetcher {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Maps a locator to a path below the root, refusing to escape it
    fn resolve(&self, locator: &str) -> io::Result<PathBuf> {
        let relative = Path::new(locator.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Locator escapes fetch root: {}", locator),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&mut self, locator: &str) -> io::Result<Box<dyn Read>> {
        let path = self.resolve(locator)?;
        debug!("Opening {}", path.display());
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Serves resources from memory and records every request
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, Vec<u8>>,
    requests: Vec<String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        MemoryFetcher::default()
    }

    /// Adds or replaces a resource
    pub fn insert<S: Into<String>>(&mut self, locator: S, data: Vec<u8>) {
        self.resources.insert(locator.into(), data);
    }

    /// Locators requested so far, in order
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&mut self, locator: &str) -> io::Result<Box<dyn Read>> {
        self.requests.push(locator.to_string());
        match self.resources.get(locator) {
            Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No resource at {}", locator),
            )),
        }
    }
}
