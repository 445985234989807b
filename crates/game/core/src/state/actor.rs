//! Actor stats, equipment and the per-variant data carried by the hero and enemies.

use crate::error::{ErrorSeverity, GameError};
use crate::grid::Position;

use super::ActorId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorError {
    #[error("actor {0} is dead and cannot be healed")]
    Dead(ActorId),
}

impl GameError for ActorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActorError::Dead(_) => "DEAD_ACTOR",
        }
    }
}

/// Melee weapon.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub damage: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            damage,
        }
    }

    /// Placeholder carried by actors that have not found a weapon yet.
    pub fn nil() -> Self {
        Self::new("nil", 0)
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::nil()
    }
}

/// Ranged spell travelling in a straight line for up to `cast_range` cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub name: String,
    pub damage: u32,
    pub mana_cost: u32,
    pub cast_range: u32,
}

impl Spell {
    pub fn new(name: impl Into<String>, damage: u32, mana_cost: u32, cast_range: u32) -> Self {
        Self {
            name: name.into(),
            damage,
            mana_cost,
            cast_range,
        }
    }

    /// Placeholder carried by actors that have not learned a spell yet.
    pub fn nil() -> Self {
        Self::new("nil", 0, 0, 1)
    }
}

impl Default for Spell {
    fn default() -> Self {
        Self::nil()
    }
}

/// Static stat block an actor is created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub max_health: u32,
    pub max_mana: u32,
    pub mana_regen: u32,
    pub fist_damage: u32,
}

impl ActorStats {
    pub const fn new(max_health: u32, max_mana: u32, mana_regen: u32, fist_damage: u32) -> Self {
        Self {
            max_health,
            max_mana,
            mana_regen,
            fist_damage,
        }
    }
}

/// Enemy decision policy, fixed when the enemy is created.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Behavior {
    /// Follows the hero but never attacks.
    Friendly,
    /// Attacks on sight, otherwise tracks the last sighting.
    Aggressive,
    /// Aggressive, and wanders at random while it has nothing to track.
    Rabid,
}

/// Cosmetic identity of the hero.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HeroProfile {
    pub name: String,
    pub title: String,
}

impl HeroProfile {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }

    pub fn known_as(&self) -> String {
        format!("{} the {}", self.name, self.title)
    }
}

/// Enemy-only state: its policy and short-term memory of the hero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyMind {
    behavior: Behavior,
    /// Where the hero was last confirmed along an unobstructed ray.
    pub last_seen: Option<Position>,
}

impl EnemyMind {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            last_seen: None,
        }
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Hero(HeroProfile),
    Enemy(EnemyMind),
}

/// A combatant on the dungeon grid.
///
/// # Invariants
///
/// - `0 <= health <= max_health` and `0 <= mana <= max_mana`
/// - `health == 0` exactly when the actor is dead
///
/// Health and mana are only reachable through the mutators below, which
/// clamp every change. [`Actor::damage`] reports the death edge but never
/// touches the grid; clearing the dead actor's cell is the combat
/// resolver's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub position: Position,
    health: u32,
    max_health: u32,
    mana: u32,
    max_mana: u32,
    pub mana_regen: u32,
    pub fist_damage: u32,
    pub weapon: Weapon,
    pub spell: Spell,
    pub kind: ActorKind,
}

impl Actor {
    /// Creates an actor at full health and mana with placeholder equipment.
    pub fn new(id: ActorId, position: Position, stats: ActorStats, kind: ActorKind) -> Self {
        Self {
            id,
            position,
            health: stats.max_health,
            max_health: stats.max_health,
            mana: stats.max_mana,
            max_mana: stats.max_mana,
            mana_regen: stats.mana_regen,
            fist_damage: stats.fist_damage,
            weapon: Weapon::nil(),
            spell: Spell::nil(),
            kind,
        }
    }

    pub fn hero(position: Position, stats: ActorStats, profile: HeroProfile) -> Self {
        Self::new(ActorId::HERO, position, stats, ActorKind::Hero(profile))
    }

    pub fn enemy(id: ActorId, position: Position, stats: ActorStats, behavior: Behavior) -> Self {
        Self::new(id, position, stats, ActorKind::Enemy(EnemyMind::new(behavior)))
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spell = spell;
        self
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, ActorKind::Hero(_))
    }

    pub fn mind(&self) -> Option<&EnemyMind> {
        match &self.kind {
            ActorKind::Enemy(mind) => Some(mind),
            ActorKind::Hero(_) => None,
        }
    }

    pub fn mind_mut(&mut self) -> Option<&mut EnemyMind> {
        match &mut self.kind {
            ActorKind::Enemy(mind) => Some(mind),
            ActorKind::Hero(_) => None,
        }
    }

    pub fn heal(&mut self, amount: u32) -> Result<(), ActorError> {
        if !self.is_alive() {
            return Err(ActorError::Dead(self.id));
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
        Ok(())
    }

    /// Lowers health, stopping at zero.
    ///
    /// Returns `true` only for the call that takes a living actor to zero.
    pub fn damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn regen_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
    }

    pub fn spend_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_sub(amount);
    }

    /// Applies the per-turn mana regeneration.
    pub fn end_turn(&mut self) {
        self.regen_mana(self.mana_regen);
    }

    pub fn equip(&mut self, weapon: Weapon) {
        self.weapon = weapon;
    }

    pub fn learn(&mut self, spell: Spell) {
        self.spell = spell;
    }
}
