//! Common error infrastructure for game-core.
//!
//! Only structural misconfiguration is an error in this crate: a malformed type
//! catalog or a key map naming unknown actions. Gameplay outcomes such as a
//! blocked move or an unrecognized key are reported through
//! [`ActionResult`](crate::ActionResult) flags instead.
//!
//! Domain-specific errors (`RegistryError`, `KeyMapError`) live next to the
//! builders that produce them and implement [`GameError`].

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Configuration**: content or wiring that must be fixed before the game can start
/// - **Internal**: unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unparseable key name
    Validation,

    /// Broken setup detected while building registries or key maps.
    ///
    /// Examples: missing parent type, inheritance cycle, unknown action name
    Configuration,

    /// Unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error must be fixed in content or wiring.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to fix the problem, not impact
/// - Error codes are stable identifiers suitable for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
