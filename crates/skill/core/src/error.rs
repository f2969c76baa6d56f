//! Common error infrastructure for skill-core.
//!
//! Domain-specific errors (`NodeError`, `GraphError`, `SessionError`, ...)
//! live beside the operations they guard. Every one of them implements
//! [`CoreError`] so callers can classify failures uniformly.
//!
//! # Design Principles
//!
//! - **Never fatal to the process**: every mutating operation returns a
//!   `Result`, the caller decides whether to surface a message
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: `error_code()` values are safe to match on in UI layers

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request was valid but the current state forbids it
///   (not enough points, still on cooldown)
/// - **Validation**: the request or data referenced something that does not exist
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the context cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry may succeed once the state changes.
    ///
    /// Examples: insufficient points, skill on cooldown
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown node key, slot index out of range
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,

    /// Context state corrupted, cannot continue.
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all skill-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are SCREAMING_SNAKE_CASE and prefixed by the domain
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
