//! World construction errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors raised while assembling a [`World`](crate::World).
///
/// Gameplay never produces these: movement failures are reported through
/// action results. They guard the places where callers build worlds directly,
/// such as content loaders and tests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    /// Tile vector does not match the declared dimensions.
    #[error("expected {expected} tiles, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    /// Entity placed outside the map.
    #[error("position {0} is out of map bounds")]
    OutOfBounds(Position),

    /// Two entities share an id.
    #[error("entity id {0} is used more than once")]
    DuplicateEntity(EntityId),

    /// The id allocator would hand out an id that is already taken.
    #[error("next entity id {next} does not exceed existing id {existing}")]
    StaleIdAllocator { next: u32, existing: EntityId },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::TileCountMismatch { .. } => "WORLD_TILE_COUNT_MISMATCH",
            WorldError::OutOfBounds(_) => "WORLD_OUT_OF_BOUNDS",
            WorldError::DuplicateEntity(_) => "WORLD_DUPLICATE_ENTITY",
            WorldError::StaleIdAllocator { .. } => "WORLD_STALE_ID_ALLOCATOR",
        }
    }
}
