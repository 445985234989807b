//! Presentation events emitted while a round resolves.
//!
//! The core never renders anything. It reports what happened through an
//! [`EventSink`] supplied by the caller, and renderers, loggers or tests
//! consume the stream in emission order.

use crate::grid::{Direction, Position};
use crate::state::{ActorId, GameStatus, Treasure};

/// How a spell's flight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpellOutcome {
    /// Struck a living actor on the last cell of the path.
    ActorHit,
    /// Stopped by an obstacle or chest on the last cell of the path.
    InanimateHit,
    /// Ran out of range (or map) without hitting anything.
    Evaporate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A weapon or fist attack connected with the actor at `position`.
    MeleeHit {
        attacker: ActorId,
        position: Position,
    },

    /// A spell was cast; `path` lists every scanned cell in order.
    SpellPath {
        caster: ActorId,
        direction: Direction,
        path: Vec<Position>,
        outcome: SpellOutcome,
    },

    /// An actor opened the chest at `position`.
    TreasureLooted {
        actor: ActorId,
        position: Position,
        treasure: Treasure,
    },

    /// An actor's health reached zero and its cell became walkable.
    ActorDied { actor: ActorId, position: Position },

    /// A round finished with the given status.
    RoundCompleted { round: u64, status: GameStatus },
}

/// Receiver for [`GameEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn emit(&mut self, _event: GameEvent) {}
}
