//! Runtime orchestration for the dungeon simulation.
//!
//! This crate wires a command provider, the turn engine and an event bus
//! into a [`GameSession`]. Consumers drive rounds with
//! [`GameSession::step`] or [`GameSession::run`] and subscribe to
//! presentation events through [`GameSession::subscribe`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the provider trait, its implementations and errors
//! - [`events`] provides the broadcast bus for presentation events
//! - [`session`] hosts the round loop
pub mod api;
pub mod events;
pub mod session;

pub use api::{
    ChannelCommandProvider, CommandProvider, Result, RuntimeError, ScriptedCommandProvider,
};
pub use events::EventBus;
pub use session::GameSession;
