//! Error types shared by the toolkit.
//!
//! Operations with a documented precondition report its violation here instead of
//! returning a sentinel value.

use thiserror::Error;

/// Errors raised when a toolkit precondition is violated.
#[derive(Debug, Error)]
pub enum FpError {
    /// A seedless fold was asked to reduce an empty collection.
    #[error("{operation} requires a non-empty collection when no seed is given")]
    EmptyCollection { operation: &'static str },
    /// A named invocation referred to a method the element does not provide.
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    /// A timer decorator was used outside of a tokio runtime.
    #[cfg(feature = "timers")]
    #[error("no async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Convenience alias used by every fallible toolkit operation.
pub type FpResult<T> = Result<T, FpError>;
