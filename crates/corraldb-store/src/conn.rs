//! Store command-surface traits.
//!
//! This module defines the narrow interface the repository layer
//! consumes, abstract over any concrete protocol:
//!
//! - [`StoreBackend`] - Opens connections to one store
//! - [`StoreConnection`] - The full command surface on one connection
//! - [`StoreTransaction`] - The write-only queue inside a multi/exec body
//! - [`StorePipeline`] - The write surface of a batched, non-atomic
//!   dispatch
//!
//! The command set is hashes (`hset`/`hgetall`/`del`), an atomic
//! counter (`incr`), sorted sets (`zadd`/`zrem`/`zcard`/`zscore`),
//! cursor scans over sorted-set members (`scan`), and the optimistic
//! envelope (`watch`/`unwatch` plus [`StoreConnection::transaction`]).

use corraldb_core::{FieldMap, ScanCursor};

use crate::error::StoreResult;

/// One batch of a cursor scan: the members found plus the cursor to
/// resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanBatch {
    /// Members matched in this batch, in scan order.
    pub members: Vec<String>,
    /// The continuation cursor; exhausted once the scan has visited
    /// every member.
    pub cursor: ScanCursor,
}

impl ScanBatch {
    /// An empty, terminal batch.
    #[must_use]
    pub const fn exhausted() -> Self {
        Self { members: Vec::new(), cursor: ScanCursor::exhausted() }
    }
}

/// A factory for store connections.
///
/// Backends must be thread-safe: one backend is shared by every pooled
/// connection the [`StoreClient`](crate::StoreClient) hands out.
pub trait StoreBackend: Send + Sync + 'static {
    /// The connection type for this backend.
    type Conn: StoreConnection + Send;

    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`](crate::StoreError::Connection)
    /// if the store is unreachable.
    fn connect(&self) -> StoreResult<Self::Conn>;
}

/// The command surface available on one store connection.
///
/// Commands are synchronous and blocking; concurrency comes from
/// callers holding separate pooled connections. Every command carries
/// the connection-level timeout configured at the backend.
pub trait StoreConnection {
    /// The write-queue handle inside a [`Self::transaction`] body.
    type Tx<'a>: StoreTransaction
    where
        Self: 'a;

    /// The write-queue handle inside a [`Self::pipeline`] body.
    type Pipe<'a>: StorePipeline
    where
        Self: 'a;

    /// Write a hash record, replacing any existing fields.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the write fails.
    fn hset(&mut self, key: &str, fields: &FieldMap) -> StoreResult<()>;

    /// Read a hash record.
    ///
    /// A missing key yields an empty field map - the store cannot
    /// distinguish the two, so readers must treat empty as absent.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the read fails.
    fn hgetall(&mut self, key: &str) -> StoreResult<FieldMap>;

    /// Delete a key.
    ///
    /// Returns `true` if the key existed.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the delete fails.
    fn del(&mut self, key: &str) -> StoreResult<bool>;

    /// Atomically increment a counter, returning the new value.
    ///
    /// A missing counter starts at zero, so the first increment
    /// returns 1.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the increment fails.
    fn incr(&mut self, key: &str) -> StoreResult<i64>;

    /// Upsert a sorted-set member with the given score.
    ///
    /// Idempotent: re-adding a present member just updates its score.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the write fails.
    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<()>;

    /// Remove members from a sorted set, returning how many existed.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the write fails.
    fn zrem(&mut self, key: &str, members: &[String]) -> StoreResult<u64>;

    /// The cardinality of a sorted set (0 for a missing key).
    ///
    /// # Errors
    ///
    /// Returns a connection error if the read fails.
    fn zcard(&mut self, key: &str) -> StoreResult<u64>;

    /// The score of a member, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the read fails.
    fn zscore(&mut self, key: &str, member: &str) -> StoreResult<Option<f64>>;

    /// Scan sorted-set members from a cursor position.
    ///
    /// Returns up to `count` members matching the optional glob
    /// `pattern`, in scan order, plus the cursor to resume from. A
    /// member present and unmoved for the whole scan is returned
    /// exactly once; members added or removed mid-scan may or may not
    /// appear. Scanning from an exhausted cursor, or past the end of a
    /// shrunken index, yields an empty exhausted batch - never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the read fails.
    fn scan(
        &mut self,
        key: &str,
        cursor: &ScanCursor,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanBatch>;

    /// Open watches on the given keys.
    ///
    /// A subsequent [`Self::transaction`] commit is refused if any
    /// watched key was written (by anyone) after the watch began.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the watch cannot be placed.
    fn watch(&mut self, keys: &[String]) -> StoreResult<()>;

    /// Drop all watches held by this connection.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command fails.
    fn unwatch(&mut self) -> StoreResult<()>;

    /// Run `body` against a write queue, then commit it atomically.
    ///
    /// The queued writes are applied all-or-nothing. Returns `Ok(None)`
    /// if the commit was refused because a watched key changed since
    /// [`Self::watch`]; the queue is discarded and nothing was written.
    /// Watches are consumed either way.
    ///
    /// # Errors
    ///
    /// Returns the body's error (queue discarded, watches dropped), or
    /// a connection error if the commit could not be attempted.
    fn transaction<R>(
        &mut self,
        body: impl FnOnce(&mut Self::Tx<'_>) -> StoreResult<R>,
    ) -> StoreResult<Option<R>>;

    /// Run `body` against a batched write queue, then flush it.
    ///
    /// The queue is dispatched in one round trip but without
    /// cross-command atomicity: a mid-batch failure leaves earlier
    /// commands applied. The flush completes before this returns.
    ///
    /// # Errors
    ///
    /// Returns the body's error (queue discarded), or a connection
    /// error from the flush.
    fn pipeline<R>(
        &mut self,
        body: impl FnOnce(&mut Self::Pipe<'_>) -> StoreResult<R>,
    ) -> StoreResult<R>;
}

/// The write surface inside an optimistic transaction body.
///
/// Commands are queued, not executed; they apply atomically when the
/// enclosing [`StoreConnection::transaction`] commits. Reads are not
/// available inside a transaction body - read before watching, then
/// queue writes.
pub trait StoreTransaction {
    /// Queue a hash write.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn hset(&mut self, key: &str, fields: &FieldMap) -> StoreResult<()>;

    /// Queue a key deletion.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn del(&mut self, key: &str) -> StoreResult<()>;

    /// Queue a sorted-set upsert.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<()>;

    /// Queue a sorted-set removal.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn zrem(&mut self, key: &str, members: &[String]) -> StoreResult<()>;
}

/// The write surface of a batched pipeline.
///
/// Same command set as [`StoreTransaction`], but dispatch is
/// best-effort per command: no atomicity across the batch.
pub trait StorePipeline {
    /// Queue a hash write.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn hset(&mut self, key: &str, fields: &FieldMap) -> StoreResult<()>;

    /// Queue a key deletion.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn del(&mut self, key: &str) -> StoreResult<()>;

    /// Queue a sorted-set upsert.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<()>;

    /// Queue a sorted-set removal.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the command cannot be queued.
    fn zrem(&mut self, key: &str, members: &[String]) -> StoreResult<()>;
}
