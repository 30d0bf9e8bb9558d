use crate::error::{ErrorSeverity, GameError};

use super::Key;

/// Key map misconfiguration, detected when the map is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyMapError {
    #[error("invalid key name '{0}'")]
    InvalidKey(String),

    #[error("key '{key}' is bound to '{action}', which is neither a core action nor a declared pass-through")]
    UnknownAction { key: Key, action: String },

    #[error("pass-through action '{0}' shadows a core action")]
    ShadowedCoreAction(String),
}

impl GameError for KeyMapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            KeyMapError::InvalidKey(_) => ErrorSeverity::Validation,
            KeyMapError::UnknownAction { .. } | KeyMapError::ShadowedCoreAction(_) => {
                ErrorSeverity::Configuration
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            KeyMapError::InvalidKey(_) => "KEYMAP_INVALID_KEY",
            KeyMapError::UnknownAction { .. } => "KEYMAP_UNKNOWN_ACTION",
            KeyMapError::ShadowedCoreAction(_) => "KEYMAP_SHADOWED_CORE_ACTION",
        }
    }
}
