//! Movement, attacks and chest pickup.
//!
//! [`CombatResolver`] is the only code that moves actors on the grid and the
//! only code that reacts to an actor's death. Illegal but expected actions
//! (walking into a wall, casting without mana, swinging at an empty cell)
//! resolve to a no-op outcome rather than an error.

use crate::command::AttackMethod;
use crate::env::GameEnv;
use crate::events::{GameEvent, SpellOutcome};
use crate::grid::{Direction, Position};
use crate::map::Cell;
use crate::state::{ActorId, ChestId, GameState, RollContext, StateError, Treasure};

/// Result of [`CombatResolver::move_actor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target cell was out of bounds, an obstacle or another actor.
    Blocked,
    Moved {
        from: Position,
        to: Position,
        /// Treasure picked up from a chest on the target cell.
        looted: Option<Treasure>,
    },
}

/// Result of [`CombatResolver::resolve_attack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Spell not cast: the attacker cannot pay its mana cost.
    InsufficientMana,
    /// Nothing living was struck.
    Missed,
    Hit {
        target: ActorId,
        damage: u32,
        killed: bool,
    },
}

/// Applies actions to a [`GameState`].
pub struct CombatResolver<'a> {
    state: &'a mut GameState,
}

impl<'a> CombatResolver<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Steps `id` one cell in `direction`.
    ///
    /// Entering a chest cell opens the chest first: one treasure is drawn,
    /// applied to the mover and the chest cell becomes walkable.
    pub fn move_actor(
        &mut self,
        id: ActorId,
        direction: Direction,
        env: &mut GameEnv<'_>,
    ) -> Result<MoveOutcome, StateError> {
        let from = self.state.try_actor(id)?.position;
        let to = from.step(direction);

        let looted = match self.state.map.get(to) {
            Ok(Cell::Walkable) => None,
            Ok(Cell::Chest(chest)) => Some(self.loot(id, chest, to, env)?),
            Ok(Cell::Obstacle | Cell::Actor(_)) | Err(_) => {
                tracing::trace!("{} blocked moving {} from {}", id, direction, from);
                return Ok(MoveOutcome::Blocked);
            }
        };

        self.state.map.make_walkable(from)?;
        self.state.map.set(to, Cell::Actor(id))?;
        self.state.try_actor_mut(id)?.position = to;

        tracing::trace!("{} moved {} to {}", id, direction, to);
        Ok(MoveOutcome::Moved { from, to, looted })
    }

    fn loot(
        &mut self,
        id: ActorId,
        chest: ChestId,
        position: Position,
        env: &mut GameEnv<'_>,
    ) -> Result<Treasure, StateError> {
        let seed = self.state.roll_seed(id, RollContext::Loot);
        let treasure = self
            .state
            .chest(chest)
            .ok_or(StateError::UnknownChest(chest))?
            .open(env.rng(), seed)
            .clone();

        treasure.apply_to(self.state.try_actor_mut(id)?)?;
        self.state.map.make_walkable(position)?;

        tracing::debug!("{} looted {} at {}", id, treasure.label(), position);
        env.emit(GameEvent::TreasureLooted {
            actor: id,
            position,
            treasure: treasure.clone(),
        });
        Ok(treasure)
    }

    /// Attacks from `id` towards `direction` with the chosen method.
    pub fn resolve_attack(
        &mut self,
        id: ActorId,
        method: AttackMethod,
        direction: Direction,
        env: &mut GameEnv<'_>,
    ) -> Result<AttackOutcome, StateError> {
        match method {
            AttackMethod::Spell => self.cast_spell(id, direction, env),
            AttackMethod::Weapon | AttackMethod::Fist => self.melee(id, method, direction, env),
        }
    }

    fn melee(
        &mut self,
        id: ActorId,
        method: AttackMethod,
        direction: Direction,
        env: &mut GameEnv<'_>,
    ) -> Result<AttackOutcome, StateError> {
        let attacker = self.state.try_actor(id)?;
        let damage = match method {
            AttackMethod::Weapon => attacker.weapon.damage,
            _ => attacker.fist_damage,
        };
        let position = attacker.position.step(direction);

        let Some(target) = self.state.map.occupant(position) else {
            tracing::trace!("{} swung {} at empty {}", id, method, position);
            return Ok(AttackOutcome::Missed);
        };

        env.emit(GameEvent::MeleeHit {
            attacker: id,
            position,
        });
        let killed = self.apply_damage(target, damage, env)?;

        tracing::debug!("{} hit {} with {} for {}", id, target, method, damage);
        Ok(AttackOutcome::Hit {
            target,
            damage,
            killed,
        })
    }

    fn cast_spell(
        &mut self,
        id: ActorId,
        direction: Direction,
        env: &mut GameEnv<'_>,
    ) -> Result<AttackOutcome, StateError> {
        let caster = self.state.try_actor_mut(id)?;
        if caster.mana() < caster.spell.mana_cost {
            tracing::trace!(
                "{} cannot afford '{}' ({} < {})",
                id,
                caster.spell.name,
                caster.mana(),
                caster.spell.mana_cost
            );
            return Ok(AttackOutcome::InsufficientMana);
        }
        caster.spend_mana(caster.spell.mana_cost);

        let origin = caster.position;
        let damage = caster.spell.damage;
        let range = caster.spell.cast_range as usize;

        let mut path = Vec::new();
        let mut struck = None;
        let mut outcome = SpellOutcome::Evaporate;
        for position in self.state.map.ray(origin, direction).take(range) {
            path.push(position);
            match self.state.map.get(position)? {
                Cell::Walkable => continue,
                Cell::Actor(target) => {
                    struck = Some(target);
                    outcome = SpellOutcome::ActorHit;
                }
                Cell::Obstacle | Cell::Chest(_) => outcome = SpellOutcome::InanimateHit,
            }
            break;
        }

        tracing::debug!("{} cast {} towards {}: {:?}", id, damage, direction, outcome);
        env.emit(GameEvent::SpellPath {
            caster: id,
            direction,
            path,
            outcome,
        });

        match struck {
            Some(target) => {
                let killed = self.apply_damage(target, damage, env)?;
                Ok(AttackOutcome::Hit {
                    target,
                    damage,
                    killed,
                })
            }
            None => Ok(AttackOutcome::Missed),
        }
    }

    /// Damages `target`; on the death edge its cell becomes walkable.
    ///
    /// This is the only place the death transition touches the grid.
    fn apply_damage(
        &mut self,
        target: ActorId,
        amount: u32,
        env: &mut GameEnv<'_>,
    ) -> Result<bool, StateError> {
        let actor = self.state.try_actor_mut(target)?;
        if !actor.damage(amount) {
            return Ok(false);
        }

        let position = actor.position;
        self.state.map.make_walkable(position)?;

        tracing::info!("{} died at {}", target, position);
        env.emit(GameEvent::ActorDied {
            actor: target,
            position,
        });
        Ok(true)
    }
}
