//! Content loaders for reading game data from files.
//!
//! Levels are JSON or RON, picked by file extension. Configuration is TOML.

pub mod config;
pub mod level;

pub use config::ConfigLoader;
pub use level::{LevelFile, LevelLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Text formats a level file may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Ron,
}

impl DataFormat {
    /// Format implied by `path`'s extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DataFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(DataFormat::Ron),
            _ => anyhow::bail!(
                "Unsupported level file {} (expected .json or .ron)",
                path.display()
            ),
        }
    }

    pub(crate) fn parse<T: serde::de::DeserializeOwned>(self, text: &str) -> LoadResult<T> {
        match self {
            DataFormat::Json => serde_json::from_str(text).context("Failed to parse level JSON"),
            DataFormat::Ron => ron::from_str(text).context("Failed to parse level RON"),
        }
    }
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
