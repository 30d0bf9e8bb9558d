//! Unified error types surfaced by the session runtime.
//!
//! Gameplay outcomes such as retries and quits are action results, not
//! errors. These variants cover setup failures and broken infrastructure.

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no entity with a behavior is available for turn scheduling")]
    NoActiveEntities,

    #[error("step worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to load game content")]
    Content(#[source] anyhow::Error),

    #[error(transparent)]
    Registry(#[from] game_core::RegistryError),
}
