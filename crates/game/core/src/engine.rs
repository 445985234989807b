//! Round orchestration.
//!
//! One call to [`TurnEngine::execute_round`] is one round: the hero acts,
//! the gateway is checked, dead enemies leave the roster, every remaining
//! enemy acts in load order and finally the hero's health is checked.

use crate::ai;
use crate::combat::CombatResolver;
use crate::command::Command;
use crate::config::{GameConfig, VictoryRule};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::events::GameEvent;
use crate::state::{ActorId, GameState, GameStatus, StateError};

/// Errors that abort a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("game is already over ({0})")]
    GameOver(GameStatus),

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for RoundError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RoundError::GameOver(_) => ErrorSeverity::Validation,
            RoundError::State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RoundError::GameOver(_) => "GAME_OVER",
            RoundError::State(error) => error.error_code(),
        }
    }
}

/// Drives a [`GameState`] one round at a time.
pub struct TurnEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> TurnEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Runs one full round with the hero's `command`.
    ///
    /// Fails with [`RoundError::GameOver`] once the game has been won or lost.
    pub fn execute_round(
        &mut self,
        command: Command,
        env: &mut GameEnv<'_>,
    ) -> Result<GameStatus, RoundError> {
        let status = self.state.status();
        if status.is_terminal() {
            return Err(RoundError::GameOver(status));
        }

        self.state.turn.round += 1;
        tracing::debug!("round {}: hero plays {}", self.state.turn.round, command);

        self.act(ActorId::HERO, Some(command), env)?;

        let hero_position = self.state.hero().position;
        if self.state.map.gateway() == Some(hero_position) {
            return Ok(self.finish(GameStatus::Won, env));
        }

        let pruned = self.state.prune_roster();
        if pruned > 0 {
            tracing::debug!("{} enemies left the roster", pruned);
        }

        if self.config.victory == VictoryRule::GatewayOrCleared && self.state.roster().is_empty() {
            return Ok(self.finish(GameStatus::Won, env));
        }

        let roster = self.state.roster.clone();
        for enemy in roster {
            // killed earlier this round; pruned next round
            if !self.state.try_actor(enemy)?.is_alive() {
                continue;
            }
            let plan = ai::plan_turn(self.state, enemy, env.rng())?;
            self.act(enemy, plan, env)?;
        }

        let status = if self.state.hero().is_alive() {
            GameStatus::Playing
        } else {
            GameStatus::Lost
        };
        Ok(self.finish(status, env))
    }

    /// Executes one actor's action, then regenerates its mana.
    ///
    /// `None` is a skipped action; it still counts as the actor's turn.
    fn act(
        &mut self,
        id: ActorId,
        command: Option<Command>,
        env: &mut GameEnv<'_>,
    ) -> Result<(), StateError> {
        let mut resolver = CombatResolver::new(self.state);
        match command {
            Some(Command::Move(direction)) => {
                resolver.move_actor(id, direction, env)?;
            }
            Some(Command::Attack(method, direction)) => {
                resolver.resolve_attack(id, method, direction, env)?;
            }
            None => {}
        }

        self.state.try_actor_mut(id)?.end_turn();
        self.state.turn.nonce += 1;
        Ok(())
    }

    fn finish(&mut self, status: GameStatus, env: &mut GameEnv<'_>) -> GameStatus {
        let round = self.state.turn.round;
        self.state.turn.status = status;

        if status.is_terminal() {
            tracing::info!("round {} ended the game: {}", round, status);
        }
        env.emit(GameEvent::RoundCompleted { round, status });
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AttackMethod;
    use crate::events::DiscardEvents;
    use crate::grid::{Direction, Position};
    use crate::map::{Cell, DungeonMap};
    use crate::rng::PcgRng;
    use crate::state::{Actor, ActorStats, Behavior, HeroProfile, Weapon};

    fn corridor(enemy_health: u32) -> (GameState, ActorId) {
        let hero = Actor::hero(
            Position::new(0, 0),
            ActorStats::new(10, 4, 1, 1),
            HeroProfile::new("Ash", "Bold"),
        )
        .with_weapon(Weapon::new("sword", 5));
        let mut state = GameState::new(3, DungeonMap::new(1, 4), hero);
        state.map.set(Position::new(0, 0), Cell::Actor(ActorId::HERO)).unwrap();

        let enemy = ActorId(1);
        state.actors.push(Actor::enemy(
            enemy,
            Position::new(0, 1),
            ActorStats::new(enemy_health, 0, 0, 3),
            Behavior::Aggressive,
        ));
        state.roster.push(enemy);
        state.map.set(Position::new(0, 1), Cell::Actor(enemy)).unwrap();
        (state, enemy)
    }

    #[test]
    fn enemies_answer_after_the_hero() {
        let (mut state, enemy) = corridor(10);
        let config = GameConfig::default();
        let mut events = Vec::new();
        let mut env = GameEnv::new(&PcgRng, &mut events);

        let status = TurnEngine::new(&mut state, &config)
            .execute_round(Command::Attack(AttackMethod::Weapon, Direction::Right), &mut env)
            .unwrap();

        assert_eq!(status, GameStatus::Playing);
        assert_eq!(state.actor(enemy).map(Actor::health), Some(5));
        assert_eq!(state.hero().health(), 7);
        assert_eq!(state.turn.round, 1);
        assert_eq!(state.turn.nonce, 2);
        assert_eq!(
            events.last(),
            Some(&GameEvent::RoundCompleted {
                round: 1,
                status: GameStatus::Playing
            })
        );
    }

    #[test]
    fn enemy_killed_by_the_hero_does_not_act() {
        let (mut state, enemy) = corridor(5);
        let config = GameConfig::default();
        let mut sink = DiscardEvents;
        let mut env = GameEnv::new(&PcgRng, &mut sink);

        TurnEngine::new(&mut state, &config)
            .execute_round(Command::Attack(AttackMethod::Weapon, Direction::Right), &mut env)
            .unwrap();

        assert!(state.roster().is_empty());
        assert!(!state.actor(enemy).unwrap().is_alive());
        assert_eq!(state.hero().health(), 10);
        assert_eq!(state.map.get(Position::new(0, 1)), Ok(Cell::Walkable));
    }

    #[test]
    fn cleared_level_wins_only_when_configured() {
        let config = GameConfig::default().with_victory(VictoryRule::GatewayOrCleared);
        let (mut state, _) = corridor(5);
        let mut sink = DiscardEvents;
        let mut env = GameEnv::new(&PcgRng, &mut sink);

        let status = TurnEngine::new(&mut state, &config)
            .execute_round(Command::Attack(AttackMethod::Weapon, Direction::Right), &mut env)
            .unwrap();
        assert_eq!(status, GameStatus::Won);
    }

    #[test]
    fn hero_regenerates_mana_even_when_idle() {
        let (mut state, _) = corridor(10);
        state.hero_mut().spend_mana(4);
        let config = GameConfig::default();
        let mut sink = DiscardEvents;
        let mut env = GameEnv::new(&PcgRng, &mut sink);

        TurnEngine::new(&mut state, &config)
            .execute_round(Command::Move(Direction::Left), &mut env)
            .unwrap();
        assert_eq!(state.hero().mana(), 1);
    }

    #[test]
    fn terminal_state_is_never_advanced() {
        let (mut state, _) = corridor(10);
        state.turn.status = GameStatus::Lost;
        let before = state.clone();
        let config = GameConfig::default();
        let mut sink = DiscardEvents;
        let mut env = GameEnv::new(&PcgRng, &mut sink);

        let result = TurnEngine::new(&mut state, &config)
            .execute_round(Command::Move(Direction::Right), &mut env);
        assert_eq!(result, Err(RoundError::GameOver(GameStatus::Lost)));
        assert_eq!(state, before);
    }
}
