use std::fmt;

/// Outcome of the game so far.
///
/// `Won` and `Lost` are terminal: once reached, no further round runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        write!(f, "{}", label)
    }
}

/// Round bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TurnState {
    pub status: GameStatus,

    /// Number of rounds started so far.
    pub round: u64,

    /// Number of actor actions executed so far.
    ///
    /// Mixed into every random roll so a replay from the same seed and
    /// commands reproduces the same draws.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
