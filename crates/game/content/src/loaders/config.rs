//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::VictoryRule;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("rng_seed = 9\n").unwrap();
        assert_eq!(config, GameConfig::with_seed(9));
    }

    #[test]
    fn victory_rule_is_snake_case() {
        let config = ConfigLoader::parse("victory = \"gateway_or_cleared\"\n").unwrap();
        assert_eq!(config.victory, VictoryRule::GatewayOrCleared);
        assert_eq!(config.rng_seed, GameConfig::DEFAULT_RNG_SEED);

        assert!(ConfigLoader::parse("victory = \"sometimes\"\n").is_err());
    }
}
