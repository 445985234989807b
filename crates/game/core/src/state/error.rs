use crate::error::{ErrorSeverity, GameError};
use crate::grid::GridError;

use super::{ActorError, ActorId, ChestId};

/// Errors raised while resolving actions against the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("actor {0} is not part of this game")]
    UnknownActor(ActorId),

    #[error("chest {0:?} is not part of this game")]
    UnknownChest(ChestId),

    #[error("actor {0} is not an enemy")]
    NotAnEnemy(ActorId),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Actor(#[from] ActorError),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::Grid(error) => error.severity(),
            StateError::Actor(error) => error.severity(),
            StateError::UnknownActor(_)
            | StateError::UnknownChest(_)
            | StateError::NotAnEnemy(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::UnknownActor(_) => "UNKNOWN_ACTOR",
            StateError::UnknownChest(_) => "UNKNOWN_CHEST",
            StateError::NotAnEnemy(_) => "NOT_AN_ENEMY",
            StateError::Grid(error) => error.error_code(),
            StateError::Actor(error) => error.error_code(),
        }
    }
}
