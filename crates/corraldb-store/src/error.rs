//! Error types for the store crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur at the store boundary.
///
/// Connection-class errors (`Connection`, `PoolTimeout`) are retryable
/// from the caller's point of view; `Disabled` is the configured no-op
/// gate, not a failure. Optimistic-commit refusals are deliberately not
/// represented here - see [`crate::client::StoreClient::transaction`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store layer was not configured/enabled.
    #[error("store is disabled")]
    Disabled,

    /// A connection could not be established or failed mid-operation.
    #[error("connection error: {0}")]
    Connection(String),

    /// No pooled connection became available before the deadline.
    #[error("timed out after {0:?} waiting for a pooled connection")]
    PoolTimeout(Duration),

    /// An internal lock was poisoned (a thread panicked while holding it).
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Returns `true` if this is the disabled gate, not a failure.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Returns `true` if the operation may succeed on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::PoolTimeout(_))
    }
}

/// A specialized `Result` type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
