//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from command providers, level construction and the round
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;

use game_core::{CommandError, ErrorSeverity, GameError, GameStatus, LevelError, RoundError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("command script exhausted after {served} commands")]
    ScriptExhausted { served: usize },

    #[error("command provider channel closed")]
    CommandChannelClosed,

    #[error("invalid command on line {line}")]
    InvalidScript {
        line: usize,
        #[source]
        source: CommandError,
    },

    #[error("failed to build the initial state from the level")]
    InitialState(#[source] LevelError),

    #[error(transparent)]
    Round(#[from] RoundError),
}

impl RuntimeError {
    /// True when a step was attempted after the game had ended.
    pub fn is_game_over(&self) -> bool {
        matches!(self, RuntimeError::Round(RoundError::GameOver(_)))
    }

    /// Final status carried by a game-over error.
    pub fn final_status(&self) -> Option<GameStatus> {
        match self {
            RuntimeError::Round(RoundError::GameOver(status)) => Some(*status),
            _ => None,
        }
    }

}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::ScriptExhausted { .. } | RuntimeError::CommandChannelClosed => {
                ErrorSeverity::Fatal
            }
            RuntimeError::InvalidScript { source, .. } => source.severity(),
            RuntimeError::InitialState(error) => error.severity(),
            RuntimeError::Round(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::ScriptExhausted { .. } => "SCRIPT_EXHAUSTED",
            RuntimeError::CommandChannelClosed => "COMMAND_CHANNEL_CLOSED",
            RuntimeError::InvalidScript { source, .. } => source.error_code(),
            RuntimeError::InitialState(error) => error.error_code(),
            RuntimeError::Round(error) => error.error_code(),
        }
    }
}
