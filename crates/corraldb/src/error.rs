//! Error types for `CorralDB`.
//!
//! This module provides the [`enum@Error`] type that represents all
//! possible errors when using a `CorralDB` repository.

use corraldb_core::CoreError;
use corraldb_store::StoreError;
use thiserror::Error;

/// Errors that can occur when using a `CorralDB` repository.
///
/// Absence is not an error: `find_by_id` reports a missing entity as
/// `Ok(None)`, and pagination reports an exhausted scan as an empty
/// page. The variants here are the failure taxonomy proper.
#[derive(Debug, Error)]
pub enum Error {
    /// The store layer was not configured/enabled.
    ///
    /// Write operations surface this so callers holding an optional
    /// store can branch on [`Error::is_disabled`] and degrade
    /// gracefully; read operations on a disabled repository return
    /// empty results instead.
    #[error("store is disabled")]
    Disabled,

    /// An optimistic save was refused: the entity's key was written by
    /// someone else between watch and commit. Nothing was written;
    /// the caller may retry the save from the top.
    #[error("optimistic commit refused: concurrent write to the same entity")]
    Conflict,

    /// A connection-class failure: pool exhaustion or network error.
    /// Retryable from the caller's point of view.
    #[error("connection failure: {0}")]
    Connection(StoreError),

    /// The codec could not encode or decode a field map. A programming
    /// or schema error, not retried.
    #[error("serialization error: {0}")]
    Serialization(#[from] CoreError),
}

impl Error {
    /// Returns `true` if this is the disabled gate, not a failure.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Returns `true` if an optimistic commit was refused.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }

    /// Returns `true` if the operation may succeed on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict | Self::Connection(_))
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Disabled => Self::Disabled,
            other => Self::Connection(other),
        }
    }
}

/// A specialized `Result` type for `CorralDB` operations.
pub type Result<T> = std::result::Result<T, Error>;
