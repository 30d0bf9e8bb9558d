//! Save-game persistence.
//!
//! Saves are keyed by slot name. The file implementation stores each slot as
//! a versioned bincode envelope; the in-memory implementation backs tests and
//! throwaway sessions.

mod error;
mod file;
mod memory;

pub use error::{RepositoryError, Result};
pub use file::{FileSaveRepository, SAVE_VERSION};
pub use memory::InMemorySaveRepository;

use game_core::World;

/// Repository for world snapshots.
pub trait SaveRepository: Send + Sync {
    /// Save a world under `slot`, replacing any previous save.
    fn save(&self, slot: &str, world: &World) -> Result<()>;

    /// Load the world saved under `slot`.
    fn load(&self, slot: &str) -> Result<Option<World>>;

    /// Check if a save exists
    fn exists(&self, slot: &str) -> bool;

    /// Delete a save. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slot names, sorted.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

/// Slot names become file names, so they are restricted to a portable set.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
