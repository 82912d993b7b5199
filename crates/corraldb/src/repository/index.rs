//! Keyspace index maintenance.
//!
//! Each keyspace owns one sorted set (`keyspace:all`) whose members are
//! entity ids and whose scores are last-modified timestamps in
//! milliseconds. The index is both the "all entities" membership set
//! and the pagination substrate; its cardinality is the repository's
//! count.
//!
//! Scores carry no global ordering guarantee beyond "by last write
//! time": concurrent saves may land out of strictly increasing order
//! across entities, and the index tolerates that by construction
//! (upsert is idempotent, membership is keyed by id alone).

use corraldb_core::{keys, EntityId, Keyspace, ScanCursor, Timestamp};
use corraldb_store::{ScanBatch, StoreConnection, StorePipeline, StoreResult, StoreTransaction};

/// The sorted-set index of one keyspace.
pub(crate) struct KeyspaceIndex {
    key: String,
}

impl KeyspaceIndex {
    pub(crate) fn new(keyspace: &Keyspace) -> Self {
        Self { key: keys::index_key(keyspace) }
    }

    /// Queue an upsert of `id` at the given modified stamp.
    pub(crate) fn upsert<Tx: StoreTransaction>(
        &self,
        tx: &mut Tx,
        id: &EntityId,
        modified: Timestamp,
    ) -> StoreResult<()> {
        tx.zadd(&self.key, modified.as_score(), id.as_str())
    }

    /// Queue a removal of `id` inside a transaction.
    pub(crate) fn remove<Tx: StoreTransaction>(
        &self,
        tx: &mut Tx,
        id: &EntityId,
    ) -> StoreResult<()> {
        tx.zrem(&self.key, &[id.as_str().to_owned()])
    }

    /// Queue a removal of `id` inside a pipeline.
    pub(crate) fn remove_batched<P: StorePipeline>(
        &self,
        pipe: &mut P,
        id: &EntityId,
    ) -> StoreResult<()> {
        pipe.zrem(&self.key, &[id.as_str().to_owned()])
    }

    /// The index cardinality - the repository's element count.
    pub(crate) fn cardinality<Conn: StoreConnection>(&self, conn: &mut Conn) -> StoreResult<u64> {
        conn.zcard(&self.key)
    }

    /// One scan batch of index members from the given cursor.
    pub(crate) fn scan<Conn: StoreConnection>(
        &self,
        conn: &mut Conn,
        cursor: &ScanCursor,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanBatch> {
        conn.scan(&self.key, cursor, pattern, count)
    }
}
