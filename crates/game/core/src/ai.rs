//! Enemy line-of-sight and behavior policies.
//!
//! An enemy's turn is planned here and executed by the turn engine through
//! the same [`CombatResolver`](crate::combat::CombatResolver) the hero uses,
//! so a plan is simply the [`Command`] the enemy would have typed. `None`
//! means the enemy stays put.

use crate::command::{AttackMethod, Command};
use crate::grid::{Direction, Position};
use crate::map::Cell;
use crate::rng::RngOracle;
use crate::state::{Actor, ActorId, Behavior, EnemyMind, GameState, RollContext, StateError};

/// The hero as seen from an enemy along an unobstructed ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sighting {
    pub position: Position,
    pub direction: Direction,
}

/// Looks for the hero along the four rays leaving `enemy`.
///
/// Directions are scanned in [`Direction::ALL`] order. On each ray the first
/// non-walkable cell decides: the hero is reported only if that cell is the
/// hero's. Obstacles, chests and other actors block the view.
pub fn locate_hero(state: &GameState, enemy: ActorId) -> Result<Option<Sighting>, StateError> {
    let origin = state.try_actor(enemy)?.position;

    for direction in Direction::ALL {
        for position in state.map.ray(origin, direction) {
            match state.map.get(position)? {
                Cell::Walkable => continue,
                Cell::Actor(id) if id.is_hero() => {
                    return Ok(Some(Sighting {
                        position,
                        direction,
                    }));
                }
                Cell::Actor(_) | Cell::Obstacle | Cell::Chest(_) => break,
            }
        }
    }

    Ok(None)
}

/// Decides what `enemy` does this turn.
///
/// A fresh sighting always overwrites the enemy's last-seen record before the
/// behavior policy runs.
pub fn plan_turn(
    state: &mut GameState,
    enemy: ActorId,
    rng: &dyn RngOracle,
) -> Result<Option<Command>, StateError> {
    let behavior = mind_mut(state, enemy)?.behavior();
    let sighting = locate_hero(state, enemy)?;
    if let Some(sighting) = sighting {
        mind_mut(state, enemy)?.last_seen = Some(sighting.position);
    }

    let plan = match (behavior, sighting) {
        (Behavior::Friendly, _) => pursue_last_seen(state, enemy)?,
        (Behavior::Aggressive | Behavior::Rabid, Some(sighting)) => {
            match engage(state.try_actor(enemy)?, sighting) {
                Some(attack) => Some(attack),
                None => pursue_last_seen(state, enemy)?,
            }
        }
        (Behavior::Aggressive, None) => pursue_last_seen(state, enemy)?,
        (Behavior::Rabid, None) => {
            if mind_mut(state, enemy)?.last_seen.is_some() {
                pursue_last_seen(state, enemy)?
            } else {
                let roll = rng.range(state.roll_seed(enemy, RollContext::Wander), 0, 3);
                Direction::ALL.get(roll as usize).copied().map(Command::Move)
            }
        }
    };

    tracing::debug!(
        "{} ({}) saw hero: {:?}, plan: {:?}",
        enemy,
        behavior,
        sighting.map(|s| s.position),
        plan
    );
    Ok(plan)
}

/// Attack choice of a hostile enemy that can see the hero.
///
/// Adjacent targets take a melee-range attack. Anything further away is
/// only attacked when the spell reaches it; otherwise the enemy closes in.
fn engage(enemy: &Actor, sighting: Sighting) -> Option<Command> {
    if enemy.position.chebyshev_distance(sighting.position) <= 1 {
        return Some(Command::Attack(
            near_attack_method(enemy),
            sighting.direction,
        ));
    }
    far_attack_ready(enemy, sighting.position)
        .then_some(Command::Attack(AttackMethod::Spell, sighting.direction))
}

/// Best single method against an adjacent target.
///
/// Weapon beats fist on ties. The spell is only chosen when it strictly
/// out-damages both and the actor can pay for it.
pub fn near_attack_method(actor: &Actor) -> AttackMethod {
    let weapon = actor.weapon.damage;
    let fist = actor.fist_damage;
    let spell = actor.spell.damage;

    if spell > weapon && spell > fist && actor.mana() >= actor.spell.mana_cost {
        AttackMethod::Spell
    } else if weapon >= fist {
        AttackMethod::Weapon
    } else {
        AttackMethod::Fist
    }
}

/// True if `actor` can cast its spell at `target`.
///
/// Range is measured as `|Δrow| + |Δcol|`.
pub fn far_attack_ready(actor: &Actor, target: Position) -> bool {
    actor.position.manhattan_distance(target) <= actor.spell.cast_range
        && actor.mana() >= actor.spell.mana_cost
}

/// One step towards the last-seen position, if it lies straight ahead.
///
/// Standing on the recorded position means the trail is lost: the record is
/// cleared and the enemy waits.
fn pursue_last_seen(state: &mut GameState, enemy: ActorId) -> Result<Option<Command>, StateError> {
    let actor = state.try_actor_mut(enemy)?;
    let position = actor.position;
    let mind = actor.mind_mut().ok_or(StateError::NotAnEnemy(enemy))?;

    let Some(target) = mind.last_seen else {
        return Ok(None);
    };
    if target == position {
        tracing::trace!("{} lost the trail at {}", enemy, position);
        mind.last_seen = None;
        return Ok(None);
    }

    Ok(Direction::between(position, target).map(Command::Move))
}

fn mind_mut(state: &mut GameState, enemy: ActorId) -> Result<&mut EnemyMind, StateError> {
    state
        .try_actor_mut(enemy)?
        .mind_mut()
        .ok_or(StateError::NotAnEnemy(enemy))
}
