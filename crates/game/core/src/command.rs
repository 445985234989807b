//! Hero commands.
//!
//! Commands are abstract: how they are acquired (keyboard, script, network)
//! is the driver's business. The textual form accepted by [`FromStr`] is
//!
//! ```text
//! up | move up
//! weapon left | attack weapon left
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::grid::Direction;

/// How an attack is delivered.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttackMethod {
    Weapon,
    Fist,
    Spell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move(Direction),
    Attack(AttackMethod, Direction),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(direction) => write!(f, "move {direction}"),
            Command::Attack(method, direction) => write!(f, "attack {method} {direction}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("invalid direction '{0}' (expected up, down, left or right)")]
    InvalidDirection(String),

    #[error("invalid attack method '{0}' (expected weapon, fist or spell)")]
    InvalidMethod(String),

    #[error("unrecognised command '{0}'")]
    InvalidVerb(String),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandError::Empty => "EMPTY_COMMAND",
            CommandError::InvalidDirection(_) => "INVALID_DIRECTION",
            CommandError::InvalidMethod(_) => "INVALID_METHOD",
            CommandError::InvalidVerb(_) => "INVALID_VERB",
        }
    }
}

fn parse_direction(token: &str) -> Result<Direction, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidDirection(token.to_owned()))
}

fn parse_method(token: &str) -> Result<AttackMethod, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidMethod(token.to_owned()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(CommandError::Empty),
            [direction] => parse_direction(direction)
                .map(Command::Move)
                .map_err(|_| CommandError::InvalidVerb(input.trim().to_owned())),
            [verb, direction] if verb.eq_ignore_ascii_case("move") => {
                Ok(Command::Move(parse_direction(direction)?))
            }
            [verb, method, direction] if verb.eq_ignore_ascii_case("attack") => Ok(
                Command::Attack(parse_method(method)?, parse_direction(direction)?),
            ),
            [method, direction] => Ok(Command::Attack(
                parse_method(method)?,
                parse_direction(direction)?,
            )),
            _ => Err(CommandError::InvalidVerb(input.trim().to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_and_attacks() {
        assert_eq!("up".parse::<Command>(), Ok(Command::Move(Direction::Up)));
        assert_eq!("move Left".parse::<Command>(), Ok(Command::Move(Direction::Left)));
        assert_eq!(
            "spell right".parse::<Command>(),
            Ok(Command::Attack(AttackMethod::Spell, Direction::Right))
        );
        assert_eq!(
            "  attack fist   down ".parse::<Command>(),
            Ok(Command::Attack(AttackMethod::Fist, Direction::Down))
        );
    }

    #[test]
    fn reports_the_malformed_part() {
        assert_eq!(
            "move north".parse::<Command>(),
            Err(CommandError::InvalidDirection("north".into()))
        );
        assert_eq!(
            "kick up".parse::<Command>(),
            Err(CommandError::InvalidMethod("kick".into()))
        );
        assert_eq!(
            "attack weapon sideways".parse::<Command>(),
            Err(CommandError::InvalidDirection("sideways".into()))
        );
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandError::InvalidVerb(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let command = Command::Attack(AttackMethod::Weapon, Direction::Up);
        assert_eq!(command.to_string(), "attack weapon up");
        assert_eq!(command.to_string().parse::<Command>(), Ok(command));
    }
}
