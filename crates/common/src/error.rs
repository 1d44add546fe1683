//! Bridge-wide error types and classification.
//!
//! Every fallible operation in the workspace returns [`BridgeResult`]. The
//! variants of [`BridgeError`] cover the conditions the bridge itself can
//! detect. Protocol misuse (updating a finalized session, operating on a
//! cleaned-up context) is deliberately *not* represented here: the session
//! layer forwards such calls to the native engine without defensive checks,
//! and the outcome is whatever the engine does. See the `Session` docs in
//! `hashbridge-core`.

use thiserror::Error;

/// Standard result type for all bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors surfaced by the engine gate, the marshaler, and the input
/// normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A session operation was attempted before the native engine finished
    /// loading. Raised by the readiness gate before any native call is made.
    #[error("hash engine is not ready; await readiness before opening a session")]
    EngineNotReady,

    /// A second engine binding was attempted. The readiness gate transitions
    /// exactly once and never reverts.
    #[error("hash engine is already bound")]
    EngineAlreadyBound,

    /// Input was neither a byte sequence nor a text string.
    #[error("input must be a byte sequence or a string, got {kind}")]
    InvalidInputType {
        /// The kind of value that was rejected.
        kind: String,
    },

    /// The native allocator returned a null address.
    #[error("native allocation of {requested} bytes failed")]
    AllocationFailed {
        /// Number of bytes that were requested.
        requested: usize,
    },
}

impl BridgeError {
    /// Create an [`BridgeError::InvalidInputType`] naming the rejected kind.
    pub fn invalid_input_type<K: Into<String>>(kind: K) -> Self {
        Self::InvalidInputType { kind: kind.into() }
    }
}

/// Error classification for consistent handling across the workspace.
///
/// Retryable errors are transient: an [`BridgeError::EngineNotReady`] call
/// succeeds once the one-time load completes. Everything else is a caller
/// or resource problem that retrying will not fix.
pub trait ErrorClassification {
    /// Check whether retrying the failed operation can succeed.
    fn is_retryable(&self) -> bool;

    /// Get the severity level for monitoring and logging decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check whether this error requires immediate attention.
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Severity levels for monitoring and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging.
    Info,
    /// Degraded but operational.
    Warning,
    /// Failure requiring attention.
    Error,
    /// System integrity at risk.
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl ErrorClassification for BridgeError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::EngineNotReady => true,
            Self::EngineAlreadyBound | Self::InvalidInputType { .. } => false,
            Self::AllocationFailed { .. } => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EngineNotReady | Self::EngineAlreadyBound => ErrorSeverity::Warning,
            Self::InvalidInputType { .. } => ErrorSeverity::Error,
            Self::AllocationFailed { .. } => ErrorSeverity::Critical,
        }
    }
}
