//! Level definitions and their conversion into a fresh [`GameState`].
//!
//! A [`LevelDefinition`] is plain data; reading it from disk is the content
//! crate's job. [`GameState::from_level`] validates it and places every
//! actor, obstacle and chest on a new map.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{GridError, Position};
use crate::map::{Cell, DungeonMap};
use crate::state::{
    Actor, ActorId, ActorStats, Behavior, ChestId, GameState, HeroProfile, Spell, Treasure,
    TreasureChest, Weapon,
};

/// Hero stat block and starting point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroSpec {
    pub max_health: u32,
    pub max_mana: u32,
    pub mana_regen: u32,
    pub fist_damage: u32,
    pub start_position: Position,
    pub name: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell: Option<Spell>,
}

impl HeroSpec {
    pub fn stats(&self) -> ActorStats {
        ActorStats::new(
            self.max_health,
            self.max_mana,
            self.mana_regen,
            self.fist_damage,
        )
    }
}

/// Enemy stat block and starting point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub max_health: u32,
    pub max_mana: u32,
    pub mana_regen: u32,
    pub fist_damage: u32,
    pub start_position: Position,
    pub behavior: Behavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell: Option<Spell>,
}

impl EnemySpec {
    pub fn stats(&self) -> ActorStats {
        ActorStats::new(
            self.max_health,
            self.max_mana,
            self.mana_regen,
            self.fist_damage,
        )
    }
}

/// Everything needed to start a level.
///
/// Every chest shares `treasure_catalog`. Enemies act in the order listed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub rows: u32,
    pub cols: u32,
    pub hero: HeroSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<EnemySpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub treasure_catalog: Vec<Treasure>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacle_positions: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub treasure_chest_positions: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gateway_position: Option<Position>,
}

/// A level that cannot be played.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("map must have at least one row and one column, got {rows}x{cols}")]
    EmptyMap { rows: u32, cols: u32 },

    #[error("{what} at {position} is outside the {rows}x{cols} map")]
    OutOfBounds {
        what: &'static str,
        position: Position,
        rows: u32,
        cols: u32,
    },

    #[error("{what} at {position} overlaps another placement")]
    Overlap {
        what: &'static str,
        position: Position,
    },

    #[error("gateway at {0} is not on a walkable cell")]
    GatewayBlocked(Position),

    #[error("level has treasure chests but an empty treasure catalog")]
    EmptyTreasureCatalog,

    #[error("level has {count} enemies (max {max})")]
    TooManyEnemies { count: usize, max: usize },

    #[error("level has {count} treasure chests (max {max})")]
    TooManyChests { count: usize, max: usize },

    #[error("{what} has zero max health")]
    LifelessActor { what: &'static str },

    #[error("unknown map symbol '{symbol}' at {position}")]
    UnknownSymbol { symbol: char, position: Position },

    #[error("map row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("map has no hero spawn")]
    MissingSpawn,

    #[error("map has {cells} enemy cells but only {stats} enemy stat blocks")]
    MissingEnemyStats { cells: usize, stats: usize },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            LevelError::EmptyMap { .. } => "LEVEL_EMPTY_MAP",
            LevelError::OutOfBounds { .. } => "LEVEL_OUT_OF_BOUNDS",
            LevelError::Overlap { .. } => "LEVEL_OVERLAP",
            LevelError::GatewayBlocked(_) => "LEVEL_GATEWAY_BLOCKED",
            LevelError::EmptyTreasureCatalog => "LEVEL_EMPTY_CATALOG",
            LevelError::TooManyEnemies { .. } => "LEVEL_TOO_MANY_ENEMIES",
            LevelError::TooManyChests { .. } => "LEVEL_TOO_MANY_CHESTS",
            LevelError::LifelessActor { .. } => "LEVEL_LIFELESS_ACTOR",
            LevelError::UnknownSymbol { .. } => "LEVEL_UNKNOWN_SYMBOL",
            LevelError::RaggedRow { .. } => "LEVEL_RAGGED_ROW",
            LevelError::MissingSpawn => "LEVEL_MISSING_SPAWN",
            LevelError::MissingEnemyStats { .. } => "LEVEL_MISSING_ENEMY_STATS",
        }
    }
}

impl GameState {
    /// Builds the initial state of `level`.
    ///
    /// Placement order is obstacles, chests, hero, enemies. The gateway must
    /// land on a cell that is neither an obstacle nor a chest.
    pub fn from_level(level: &LevelDefinition, config: &GameConfig) -> Result<Self, LevelError> {
        if level.rows == 0 || level.cols == 0 {
            return Err(LevelError::EmptyMap {
                rows: level.rows,
                cols: level.cols,
            });
        }
        if level.enemies.len() > GameConfig::MAX_ENEMIES {
            return Err(LevelError::TooManyEnemies {
                count: level.enemies.len(),
                max: GameConfig::MAX_ENEMIES,
            });
        }
        if level.treasure_chest_positions.len() > GameConfig::MAX_CHESTS {
            return Err(LevelError::TooManyChests {
                count: level.treasure_chest_positions.len(),
                max: GameConfig::MAX_CHESTS,
            });
        }

        let mut map = DungeonMap::new(level.rows, level.cols);

        for &position in &level.obstacle_positions {
            place(&mut map, "obstacle", position, Cell::Obstacle)?;
        }

        let mut chests = Vec::with_capacity(level.treasure_chest_positions.len());
        if !level.treasure_chest_positions.is_empty() {
            let chest = TreasureChest::new(level.treasure_catalog.clone())
                .ok_or(LevelError::EmptyTreasureCatalog)?;
            for (index, &position) in level.treasure_chest_positions.iter().enumerate() {
                place(&mut map, "chest", position, Cell::Chest(ChestId(index as u32)))?;
                chests.push(chest.clone());
            }
        }

        if let Some(gateway) = level.gateway_position {
            match map.get(gateway) {
                Ok(Cell::Walkable) => {}
                Ok(_) => return Err(LevelError::GatewayBlocked(gateway)),
                Err(error) => return Err(out_of_bounds("gateway", error)),
            }
            map.set_gateway(gateway)
                .map_err(|error| out_of_bounds("gateway", error))?;
        }

        let spec = &level.hero;
        if spec.max_health == 0 {
            return Err(LevelError::LifelessActor { what: "hero" });
        }
        let mut hero = Actor::hero(
            spec.start_position,
            spec.stats(),
            HeroProfile::new(spec.name.clone(), spec.title.clone()),
        );
        equip(&mut hero, spec.weapon.as_ref(), spec.spell.as_ref());
        place(&mut map, "hero", spec.start_position, Cell::Actor(ActorId::HERO))?;

        let mut state = GameState::new(config.rng_seed, map, hero);
        state.chests = chests;

        for (index, spec) in level.enemies.iter().enumerate() {
            if spec.max_health == 0 {
                return Err(LevelError::LifelessActor { what: "enemy" });
            }
            if level.gateway_position == Some(spec.start_position) {
                return Err(LevelError::GatewayBlocked(spec.start_position));
            }
            let id = ActorId(index as u32 + 1);
            let mut enemy = Actor::enemy(id, spec.start_position, spec.stats(), spec.behavior);
            equip(&mut enemy, spec.weapon.as_ref(), spec.spell.as_ref());
            place(&mut state.map, "enemy", spec.start_position, Cell::Actor(id))?;

            state.actors.push(enemy);
            state
                .roster
                .try_push(id)
                .map_err(|_| LevelError::TooManyEnemies {
                    count: level.enemies.len(),
                    max: GameConfig::MAX_ENEMIES,
                })?;
        }

        tracing::debug!(
            "level {}x{} loaded: {} enemies, {} chests, gateway {:?}",
            level.rows,
            level.cols,
            level.enemies.len(),
            state.chests.len(),
            level.gateway_position
        );
        Ok(state)
    }
}

fn place(
    map: &mut DungeonMap,
    what: &'static str,
    position: Position,
    cell: Cell,
) -> Result<(), LevelError> {
    match map.get(position) {
        Ok(Cell::Walkable) => {}
        Ok(_) => return Err(LevelError::Overlap { what, position }),
        Err(error) => return Err(out_of_bounds(what, error)),
    }
    map.set(position, cell)
        .map(|_| ())
        .map_err(|error| out_of_bounds(what, error))
}

fn out_of_bounds(what: &'static str, error: GridError) -> LevelError {
    let GridError::OutOfBounds {
        position,
        rows,
        cols,
    } = error;
    LevelError::OutOfBounds {
        what,
        position,
        rows,
        cols,
    }
}

fn equip(actor: &mut Actor, weapon: Option<&Weapon>, spell: Option<&Spell>) {
    if let Some(weapon) = weapon {
        actor.equip(weapon.clone());
    }
    if let Some(spell) = spell {
        actor.learn(spell.clone());
    }
}
