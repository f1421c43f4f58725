//! Where skip listings come from

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::types::{parse_skips, Skip};
use crate::error::{DevdeckError, Result};

/// A provider of skip listings.
///
/// The browser front end fetches from the hire API; the CLI reads a saved
/// response from disk.
pub trait SkipSource {
    fn load(&self) -> Result<Vec<Skip>>;
}

/// Listing saved as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SkipSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Skip>> {
        if !self.path.exists() {
            return Err(DevdeckError::PathNotFound(self.path.display().to_string()));
        }
        let content = fs::read_to_string(&self.path)?;
        let skips = parse_skips(&content)?;
        debug!(path = %self.path.display(), count = skips.len(), "skip listing loaded");
        Ok(skips)
    }
}
