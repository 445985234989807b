//! Deterministic rules of the dungeon crawler.
//!
//! `game-core` owns the grid, the actors, combat, enemy AI and the round
//! loop. It performs no I/O: randomness and event delivery are injected
//! through [`GameEnv`], and a round only advances when the caller hands
//! [`TurnEngine::execute_round`] the hero's next [`Command`].
pub mod ai;
pub mod combat;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod grid;
pub mod level;
pub mod map;
pub mod rng;
pub mod state;

pub use ai::{Sighting, locate_hero, plan_turn};
pub use combat::{AttackOutcome, CombatResolver, MoveOutcome};
pub use command::{AttackMethod, Command, CommandError};
pub use config::{GameConfig, VictoryRule};
pub use engine::{RoundError, TurnEngine};
pub use env::GameEnv;
pub use error::{ErrorSeverity, GameError};
pub use events::{DiscardEvents, EventSink, GameEvent, SpellOutcome};
pub use grid::{Direction, Grid, GridError, MapDimensions, Position, Ray};
pub use level::{EnemySpec, HeroSpec, LevelDefinition, LevelError};
pub use map::{Cell, DungeonMap};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};
pub use state::{
    Actor, ActorError, ActorId, ActorKind, ActorStats, Behavior, ChestId, EnemyMind, GameState,
    GameStatus, HeroProfile, RollContext, Spell, StateError, Treasure, TreasureChest, TurnState,
    Weapon,
};
