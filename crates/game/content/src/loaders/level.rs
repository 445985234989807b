//! Level loader.
//!
//! A level file holds either a full [`LevelDefinition`] or a
//! [`TemplateLevel`]; both load into the list of playable levels.

use std::path::Path;

use anyhow::Context;
use game_core::{GameConfig, GameState, LevelDefinition};

use crate::loaders::{DataFormat, LoadResult, read_file};
use crate::template::TemplateLevel;

/// Contents of a level file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum LevelFile {
    Definition(LevelDefinition),
    Template(TemplateLevel),
}

impl LevelFile {
    /// Playable levels described by the file, one per hero spawn.
    pub fn into_levels(self) -> LoadResult<Vec<LevelDefinition>> {
        match self {
            LevelFile::Definition(level) => Ok(vec![level]),
            LevelFile::Template(template) => template
                .levels()
                .context("Malformed level template"),
        }
    }
}

/// Loader for level files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load every level described by the file at `path`.
    ///
    /// Each level is checked by building its initial state once, so a
    /// malformed level fails here rather than mid-session.
    pub fn load(path: &Path) -> LoadResult<Vec<LevelDefinition>> {
        let format = DataFormat::from_path(path)?;
        let content = read_file(path)?;
        let levels = Self::parse(&content, format)
            .with_context(|| format!("Invalid level file {}", path.display()))?;

        tracing::info!("Loaded {} level(s) from {}", levels.len(), path.display());
        Ok(levels)
    }

    /// Parse and validate level text.
    pub fn parse(content: &str, format: DataFormat) -> LoadResult<Vec<LevelDefinition>> {
        let file: LevelFile = format.parse(content)?;
        let levels = file.into_levels()?;

        let config = GameConfig::default();
        for (index, level) in levels.iter().enumerate() {
            GameState::from_level(level, &config)
                .with_context(|| format!("Level {} is not playable", index))?;
        }
        Ok(levels)
    }

    /// The dungeon bundled with the crate.
    pub fn builtin() -> LoadResult<Vec<LevelDefinition>> {
        let content = include_str!("../../data/levels/catacombs.json");
        Self::parse(content, DataFormat::Json).context("Bundled level is invalid")
    }
}
