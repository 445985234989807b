//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into the plain definitions `game-core`
//! consumes:
//! - Level definitions (JSON or RON)
//! - Character-template levels (symbol rows plus stat blocks)
//! - Game configuration (TOML)
//!
//! File I/O lives here so that the core stays pure.

pub mod template;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use template::{EnemyRoster, EnemyStats, HeroStats, TemplateLevel};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, DataFormat, LevelFile, LevelLoader, LoadResult};
