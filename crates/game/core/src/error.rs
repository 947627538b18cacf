//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`ActionError`, `StartError`, ...) live in the
//! modules they guard; this module provides the shared severity taxonomy,
//! the debugging context attached to variants, and the trait every error
//! enum in the crate implements.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation has its own error type with specific variants
//! - **Rich Context**: Errors carry the acting unit, round, and nonce for debugging
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::state::{Round, UnitId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions; retrying or re-evaluating may succeed
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted session state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - condition may clear on the next evaluation.
    ///
    /// Example: turn order computed over an empty battlefield
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown ability, missing target, wrong actor
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: meter out of bounds after resolution, policy unit with no
    /// abilities. These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - session state corrupted, cannot continue.
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

/// Contextual information attached to errors for debugging and diagnostics.
///
/// Captured at the point of error creation with whatever session state is
/// relevant to diagnosing the failure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Unit that triggered the error (if applicable).
    pub unit: Option<UnitId>,

    /// Round in which the error occurred (if applicable).
    pub round: Option<Round>,

    /// Action nonce at the time of error.
    ///
    /// The nonce uniquely identifies the action sequence and is useful for
    /// correlating errors with specific transcript positions in logs.
    pub nonce: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context with the given nonce.
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            unit: None,
            round: None,
            nonce,
            message: None,
        }
    }

    /// Attaches a unit to this context (builder pattern).
    #[must_use]
    pub const fn with_unit(mut self, unit: UnitId) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Attaches a round to this context (builder pattern).
    #[must_use]
    pub const fn with_round(mut self, round: Round) -> Self {
        self.round = Some(round);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all battle-core errors.
///
/// Provides a uniform interface for error classification and context
/// retrieval across the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impls
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    ///
    /// Not all errors carry context (e.g., wrappers around other crates).
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
