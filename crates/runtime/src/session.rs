//! Session driver: feeds provider commands to the turn engine.

use game_core::{
    GameConfig, GameEnv, GameEvent, GameState, GameStatus, LevelDefinition, PcgRng, RngOracle,
    RoundError, TurnEngine,
};
use tokio::sync::broadcast;

use crate::api::{CommandProvider, Result, RuntimeError};
use crate::events::EventBus;

/// One playthrough of a level.
///
/// The session owns the authoritative [`GameState`]. Each [`step`](Self::step)
/// awaits one command from the provider, runs one round and then publishes
/// that round's events on the bus in emission order.
pub struct GameSession<P> {
    level: LevelDefinition,
    config: GameConfig,
    state: GameState,
    provider: P,
    rng: Box<dyn RngOracle>,
    bus: EventBus,
}

impl<P: CommandProvider> GameSession<P> {
    pub fn new(level: LevelDefinition, config: GameConfig, provider: P) -> Result<Self> {
        let state = GameState::from_level(&level, &config).map_err(RuntimeError::InitialState)?;
        tracing::info!(
            "Session started on a {}x{} level with {} enemies (seed {})",
            level.rows,
            level.cols,
            level.enemies.len(),
            config.rng_seed
        );

        Ok(Self {
            level,
            config,
            state,
            provider,
            rng: Box::new(PcgRng),
            bus: EventBus::new(),
        })
    }

    /// Replaces the randomness source used for chest draws and wandering.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.bus.subscribe()
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Plays one round.
    ///
    /// A finished game fails with [`RoundError::GameOver`] without asking the
    /// provider for a command.
    pub async fn step(&mut self) -> Result<GameStatus> {
        let status = self.state.status();
        if status.is_terminal() {
            return Err(RoundError::GameOver(status).into());
        }

        let command = self.provider.next_command(&self.state).await?;

        let mut events = Vec::new();
        let outcome = {
            let mut env = GameEnv::new(self.rng.as_ref(), &mut events);
            TurnEngine::new(&mut self.state, &self.config).execute_round(command, &mut env)
        };

        if let Ok(status) = outcome {
            tracing::debug!(
                "Round {} ({}) -> {} with {} events",
                self.state.turn.round,
                command,
                status,
                events.len()
            );
        }
        publish_round(&self.bus, events, outcome)
    }

    /// Plays rounds until the game is won or lost.
    pub async fn run(&mut self) -> Result<GameStatus> {
        loop {
            let status = self.step().await?;
            if status.is_terminal() {
                tracing::info!(
                    "Session finished after {} rounds: {}",
                    self.state.turn.round,
                    status
                );
                return Ok(status);
            }
        }
    }

    /// Rebuilds the initial state of the level. The provider is kept.
    pub fn reset(&mut self) -> Result<()> {
        self.state =
            GameState::from_level(&self.level, &self.config).map_err(RuntimeError::InitialState)?;
        tracing::info!("Session reset");
        Ok(())
    }
}

/// Publishes whatever a round emitted, even when the round failed partway.
fn publish_round(
    bus: &EventBus,
    events: Vec<GameEvent>,
    outcome: std::result::Result<GameStatus, RoundError>,
) -> Result<GameStatus> {
    if let Err(error) = &outcome {
        tracing::warn!("Round aborted after {} events: {}", events.len(), error);
    }
    for event in events {
        bus.publish(event);
    }
    Ok(outcome?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ActorId, Position, StateError};

    #[tokio::test]
    async fn aborted_rounds_still_publish_their_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let died = GameEvent::ActorDied {
            actor: ActorId(1),
            position: Position::new(0, 1),
        };

        let error = publish_round(
            &bus,
            vec![died.clone()],
            Err(RoundError::State(StateError::UnknownActor(ActorId(7)))),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            RuntimeError::Round(RoundError::State(StateError::UnknownActor(ActorId(7))))
        ));
        assert_eq!(rx.recv().await.unwrap(), died);
    }
}
