//! Error types raised by repository implementations.

use game_core::WorldError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid save slot name '{0}'")]
    InvalidSlot(String),

    #[error("corrupt saved world: {0}")]
    CorruptWorld(#[from] WorldError),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
