//! Session runtime for the turn-based game core.
//!
//! This crate hosts the game loop around `game-core`: it feeds keys from a
//! frontend into the player state machine, runs scheduler steps on blocking
//! tasks, broadcasts what happened, and persists worlds.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the game loop and its builder
//! - [`input`] bridges async key channels to the core's input interface
//! - [`events`] provides the broadcast event bus
//! - [`repository`] provides save-game persistence
//! - [`config`] and [`logging`] cover process-level setup
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod repository;
pub mod session;

pub use config::SessionConfig;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, GameEvent};
pub use input::{ChannelInput, act_async};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SAVE_VERSION, SaveRepository,
};
pub use session::{GameSession, GameSessionBuilder, SAVE_ACTION, SessionHooks, SessionOutcome};
