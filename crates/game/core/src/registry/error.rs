//! Registry build errors.

use crate::error::{ErrorSeverity, GameError};

use super::{BehaviorKey, Category};

/// Structural problems detected while building a [`TypeRegistry`](super::TypeRegistry).
///
/// Property lookups never fail at resolution time; everything that could make
/// them hang or silently misbehave is rejected here instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{category} type '{name}' names unknown parent '{parent}'")]
    UnknownParent {
        category: Category,
        name: String,
        parent: String,
    },

    #[error("{category} type '{name}' is part of an inheritance cycle")]
    InheritanceCycle { category: Category, name: String },

    #[error("entity type '{name}' acts through unregistered behavior '{behavior}'")]
    UnknownBehavior { name: String, behavior: BehaviorKey },

    #[error("entity type '{name}' has an `act` property that is not a behavior handle")]
    InvalidBehaviorValue { name: String },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        use RegistryError::*;
        match self {
            UnknownParent { .. } => "REGISTRY_UNKNOWN_PARENT",
            InheritanceCycle { .. } => "REGISTRY_INHERITANCE_CYCLE",
            UnknownBehavior { .. } => "REGISTRY_UNKNOWN_BEHAVIOR",
            InvalidBehaviorValue { .. } => "REGISTRY_INVALID_BEHAVIOR_VALUE",
        }
    }
}
