//! Collaborators injected into the engine by its caller.

use crate::events::{EventSink, GameEvent};
use crate::rng::RngOracle;

/// Context threaded through one round: the randomness source and the event
/// sink. Owned by the caller; the core keeps no global state.
pub struct GameEnv<'a> {
    rng: &'a dyn RngOracle,
    events: &'a mut dyn EventSink,
}

impl<'a> GameEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, events: &'a mut dyn EventSink) -> Self {
        Self { rng, events }
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.emit(event);
    }
}
