//! Authoritative game state representation.
//!
//! Actors live in an arena indexed by [`ActorId`]. The grid and the enemy
//! roster both store identifiers only, so an actor that dies mid-round is
//! never reachable through a stale reference: its cell is cleared by the
//! combat resolver and its id is pruned from the roster by the turn engine.
pub mod actor;
mod error;
pub mod treasure;
mod turn;

use std::fmt;

use arrayvec::ArrayVec;

pub use actor::{
    Actor, ActorError, ActorKind, ActorStats, Behavior, EnemyMind, HeroProfile, Spell, Weapon,
};
pub use error::StateError;
pub use treasure::{Treasure, TreasureChest};
pub use turn::{GameStatus, TurnState};

use crate::config::GameConfig;
use crate::grid::Position;
use crate::map::{Cell, DungeonMap};
use crate::rng::compute_seed;

/// Stable identifier of an actor for the lifetime of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the hero. Enemies are numbered from 1 in load order.
    pub const HERO: Self = Self(0);

    #[inline]
    pub const fn is_hero(self) -> bool {
        self.0 == Self::HERO.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a treasure chest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChestId(pub u32);

/// Independent random streams drawn within a single action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Loot = 0,
    Wander = 1,
}

pub(crate) type Roster = ArrayVec<ActorId, { GameConfig::MAX_ENEMIES }>;

/// Canonical snapshot of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Seed every random roll is derived from. Set once at level load.
    pub game_seed: u64,

    pub turn: TurnState,

    pub map: DungeonMap,

    /// Actor arena; index `n` holds `ActorId(n)`, index 0 is the hero.
    pub(crate) actors: Vec<Actor>,

    /// Enemies still taking turns, in load order.
    pub(crate) roster: Roster,

    pub(crate) chests: Vec<TreasureChest>,
}

impl GameState {
    pub(crate) fn new(game_seed: u64, map: DungeonMap, hero: Actor) -> Self {
        Self {
            game_seed,
            turn: TurnState::new(),
            map,
            actors: vec![hero],
            roster: Roster::new(),
            chests: Vec::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.turn.status
    }

    pub fn hero(&self) -> &Actor {
        &self.actors[ActorId::HERO.0 as usize]
    }

    pub fn hero_mut(&mut self) -> &mut Actor {
        &mut self.actors[ActorId::HERO.0 as usize]
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0 as usize)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0 as usize)
    }

    pub(crate) fn try_actor(&self, id: ActorId) -> Result<&Actor, StateError> {
        self.actor(id).ok_or(StateError::UnknownActor(id))
    }

    pub(crate) fn try_actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, StateError> {
        self.actor_mut(id).ok_or(StateError::UnknownActor(id))
    }

    /// Every actor ever loaded, dead ones included.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Enemies still in the active roster, in their fixed acting order.
    pub fn roster(&self) -> &[ActorId] {
        &self.roster
    }

    /// Living enemies in acting order.
    pub fn living_enemies(&self) -> impl Iterator<Item = &Actor> {
        self.roster
            .iter()
            .filter_map(|id| self.actor(*id))
            .filter(|actor| actor.is_alive())
    }

    pub fn chest(&self, id: ChestId) -> Option<&TreasureChest> {
        self.chests.get(id.0 as usize)
    }

    /// Drops dead enemies from the roster. Returns how many were removed.
    pub(crate) fn prune_roster(&mut self) -> usize {
        let before = self.roster.len();
        let actors = &self.actors;
        self.roster
            .retain(|id| actors.get(id.0 as usize).is_some_and(Actor::is_alive));
        before - self.roster.len()
    }

    /// Seed for a random roll made by `actor` during the current action.
    pub(crate) fn roll_seed(&self, actor: ActorId, context: RollContext) -> u64 {
        compute_seed(self.game_seed, self.turn.nonce, actor.0, context as u32)
    }

    /// Renders the map as rows of symbols.
    ///
    /// `#` obstacle, `H` hero, `E` enemy, `T` chest, `G` gateway, `.` walkable.
    pub fn render_rows(&self) -> Vec<String> {
        let dimensions = self.map.dimensions();
        let mut rows = Vec::with_capacity(dimensions.rows as usize);
        for row in 0..dimensions.rows as i32 {
            let line: String = (0..dimensions.cols as i32)
                .map(|col| self.symbol_at(Position::new(row, col)))
                .collect();
            rows.push(line);
        }
        rows
    }

    fn symbol_at(&self, position: Position) -> char {
        match self.map.get(position) {
            Ok(Cell::Obstacle) => '#',
            Ok(Cell::Actor(id)) if id.is_hero() => 'H',
            Ok(Cell::Actor(_)) => 'E',
            Ok(Cell::Chest(_)) => 'T',
            Ok(Cell::Walkable) if self.map.gateway() == Some(position) => 'G',
            Ok(Cell::Walkable) | Err(_) => '.',
        }
    }
}
