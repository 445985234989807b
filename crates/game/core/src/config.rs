/// How a level can be won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VictoryRule {
    /// Only reaching the gateway wins.
    #[default]
    Gateway,
    /// Reaching the gateway, or being the last one standing after the hero's action.
    GatewayOrCleared,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seed all chest draws and wander rolls derive from.
    pub rng_seed: u64,

    pub victory: VictoryRule,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ENEMIES: usize = 128;
    pub const MAX_CHESTS: usize = 256;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RNG_SEED: u64 = 0x5EED_D00D;

    pub fn new() -> Self {
        Self {
            rng_seed: Self::DEFAULT_RNG_SEED,
            victory: VictoryRule::Gateway,
        }
    }

    pub fn with_seed(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::new()
        }
    }

    pub fn with_victory(mut self, victory: VictoryRule) -> Self {
        self.victory = victory;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
