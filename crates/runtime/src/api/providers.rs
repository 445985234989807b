//! Asynchronous abstraction for sourcing the hero's commands.
//!
//! Runtime users plug in [`CommandProvider`] implementations so a session
//! can run from a script, a channel fed by a UI, or anything else. Waiting
//! on the provider is the only point where a session suspends.
use std::collections::VecDeque;

use async_trait::async_trait;
use game_core::{Command, GameState};
use tokio::sync::mpsc;

use super::errors::{Result, RuntimeError};

/// Source of hero commands.
#[async_trait]
pub trait CommandProvider: Send {
    /// Provide the hero's next command for the given game state.
    ///
    /// # Arguments
    /// * `state` - Read-only snapshot of the state the command will be played on
    async fn next_command(&mut self, state: &GameState) -> Result<Command>;
}

/// Plays a fixed list of commands, then fails with
/// [`RuntimeError::ScriptExhausted`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedCommandProvider {
    commands: VecDeque<Command>,
    served: usize,
}

impl ScriptedCommandProvider {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            served: 0,
        }
    }

    /// Parses one command per line. Blank lines and lines starting with `#`
    /// are skipped.
    pub fn from_script(script: &str) -> Result<Self> {
        let mut commands = VecDeque::new();
        for (index, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let command = line
                .parse()
                .map_err(|source| RuntimeError::InvalidScript {
                    line: index + 1,
                    source,
                })?;
            commands.push_back(command);
        }
        Ok(Self {
            commands,
            served: 0,
        })
    }

    /// Commands not yet played.
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

#[async_trait]
impl CommandProvider for ScriptedCommandProvider {
    async fn next_command(&mut self, _state: &GameState) -> Result<Command> {
        let command = self
            .commands
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted {
                served: self.served,
            })?;
        self.served += 1;
        Ok(command)
    }
}

/// Receives commands from an mpsc channel, e.g. one fed by an input task.
#[derive(Debug)]
pub struct ChannelCommandProvider {
    rx: mpsc::Receiver<Command>,
}

impl ChannelCommandProvider {
    pub fn new(rx: mpsc::Receiver<Command>) -> Self {
        Self { rx }
    }

    /// Creates a provider together with the sender that feeds it.
    pub fn channel(capacity: usize) -> (mpsc::Sender<Command>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl CommandProvider for ChannelCommandProvider {
    async fn next_command(&mut self, _state: &GameState) -> Result<Command> {
        self.rx
            .recv()
            .await
            .ok_or(RuntimeError::CommandChannelClosed)
    }
}
