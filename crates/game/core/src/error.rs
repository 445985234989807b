//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`GridError`, `ActorError`, `LevelError`, ...) live
//! next to the code that raises them. They share the [`GameError`] trait so
//! drivers can classify a failure without matching on every variant.
//!
//! Illegal-but-expected moves (walking into a wall, casting without mana,
//! swinging at empty air) are not errors. They resolve as no-ops and still
//! consume the actor's turn. Only structural violations surface here, and
//! they always propagate to the caller.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the driver may retry with a different request.
    Recoverable,

    /// Validation error - malformed input that must be corrected first.
    ///
    /// Examples: unknown direction or attack method in a command.
    Validation,

    /// Internal error - a state invariant was broken.
    ///
    /// Examples: grid access out of bounds, healing a dead actor.
    Internal,

    /// Fatal error - the session cannot start or continue.
    ///
    /// Examples: malformed level definition.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
