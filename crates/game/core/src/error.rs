//! Common error infrastructure for battler-core.
//!
//! Domain-specific errors (`TargetingError`, `ActionError`, `ExecuteError`)
//! live beside the code that produces them. This module only provides the
//! shared classification used by callers to decide how to surface a failure.
//!
//! # Error classes
//!
//! - **Rejected actions** (illegal geometry, cooldowns, gold, ...) are
//!   detected before any mutation and leave the board untouched.
//! - **Integrity failures** (caster or target not where the command says)
//!   are fatal to the request and must be reported to the caller.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same piece may try a different action.
    ///
    /// Examples: destination occupied, ability on cooldown, not enough gold
    Recoverable,

    /// Validation error - malformed command, should not retry without changes.
    ///
    /// Examples: missing target square, unknown item
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the command references a board that does not exist.
    ///
    /// Examples: caster not found, target id mismatch
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an integrity problem.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battler-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
