//! Common error infrastructure for umbra-core.
//!
//! Domain-specific errors (e.g. `RangeError`, `MoveError`) live next to the
//! code that produces them. This module provides the shared classification
//! trait every one of them implements.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the turn can continue with another action
/// - **Validation**: invalid input, rejected without retry
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: a consumed component failed; the tick loop halts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: destination blocked, destination occupied
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: coordinate out of range, spawn outside the grid
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the scheduler has no retry policy for it.
    ///
    /// Examples: visibility oracle fault, decision function fault, input closed
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

    /// Returns true if the tick loop cannot continue after this error.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all umbra-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers for logs and tests
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
