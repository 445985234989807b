//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration of one headless run.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Level file (JSON/RON definition or template). Bundled level if unset.
    pub level: Option<PathBuf>,
    /// Command script, one command per line. Stdin if unset.
    pub script: Option<PathBuf>,
    /// TOML game configuration. Defaults if unset.
    pub game_config: Option<PathBuf>,
    /// Which hero spawn of a template to start on.
    pub spawn: usize,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_LEVEL` - Level file (default: bundled level)
    /// - `DUNGEON_SCRIPT` - Command script (default: read commands from stdin)
    /// - `DUNGEON_CONFIG` - Game configuration TOML (default: built-in defaults)
    /// - `DUNGEON_SPAWN` - Spawn index for template levels (default: 0)
    /// - `DUNGEON_SESSION_ID` - Session identifier for the log directory (default: auto-generated)
    /// - `DUNGEON_LOG_DIR` - Root directory for session logs (default: platform-specific)
    pub fn from_env() -> Self {
        Self {
            level: read_path("DUNGEON_LEVEL"),
            script: read_path("DUNGEON_SCRIPT"),
            game_config: read_path("DUNGEON_CONFIG"),
            spawn: read_env::<usize>("DUNGEON_SPAWN").unwrap_or(0),
            session_id: env::var("DUNGEON_SESSION_ID").ok(),
            log_dir: read_path("DUNGEON_LOG_DIR"),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
