//! Connections, transactions, and pipelines for the memory backend.

use std::ops::Bound;
use std::sync::{Arc, Mutex};

use corraldb_core::{FieldMap, ScanCursor};

use super::store::{State, WriteOp};
use crate::conn::{ScanBatch, StoreConnection, StorePipeline, StoreTransaction};
use crate::error::{StoreError, StoreResult};
use crate::match_pattern;

/// A connection to a [`MemoryStore`](super::MemoryStore).
///
/// Holds the watch state placed by this connection; data lives in the
/// store shared by all connections.
pub struct MemoryConn {
    state: Arc<Mutex<State>>,
    watches: Vec<(String, u64)>,
}

impl MemoryConn {
    pub(super) fn new(state: Arc<Mutex<State>>) -> Self {
        Self { state, watches: Vec::new() }
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl StoreConnection for MemoryConn {
    type Tx<'a>
        = MemoryTx
    where
        Self: 'a;

    type Pipe<'a>
        = MemoryPipe
    where
        Self: 'a;

    fn hset(&mut self, key: &str, fields: &FieldMap) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.apply(WriteOp::HSet { key: key.to_owned(), fields: fields.clone() });
        Ok(())
    }

    fn hgetall(&mut self, key: &str) -> StoreResult<FieldMap> {
        let state = self.lock()?;
        Ok(state.hashes.get(key).cloned().unwrap_or_default())
    }

    fn del(&mut self, key: &str) -> StoreResult<bool> {
        let mut state = self.lock()?;
        Ok(state.delete(key))
    }

    fn incr(&mut self, key: &str) -> StoreResult<i64> {
        let mut state = self.lock()?;
        Ok(state.increment(key))
    }

    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.apply(WriteOp::ZAdd {
            key: key.to_owned(),
            score,
            member: member.to_owned(),
        });
        Ok(())
    }

    fn zrem(&mut self, key: &str, members: &[String]) -> StoreResult<u64> {
        let mut state = self.lock()?;
        let existing = state.zsets.get(key).map_or(0, |zset| {
            members.iter().filter(|m| zset.contains_key(*m)).count() as u64
        });
        state.apply(WriteOp::ZRem { key: key.to_owned(), members: members.to_vec() });
        Ok(existing)
    }

    fn zcard(&mut self, key: &str) -> StoreResult<u64> {
        let state = self.lock()?;
        Ok(state.zsets.get(key).map_or(0, |zset| zset.len() as u64))
    }

    fn zscore(&mut self, key: &str, member: &str) -> StoreResult<Option<f64>> {
        let state = self.lock()?;
        Ok(state.zsets.get(key).and_then(|zset| zset.get(member).copied()))
    }

    fn scan(
        &mut self,
        key: &str,
        cursor: &ScanCursor,
        pattern: Option<&str>,
        count: usize,
    ) -> StoreResult<ScanBatch> {
        if cursor.is_exhausted() || count == 0 {
            return Ok(ScanBatch::exhausted());
        }

        let state = self.lock()?;
        let Some(zset) = state.zsets.get(key) else {
            // Missing or rebuilt-empty index: the scan just runs out.
            return Ok(ScanBatch::exhausted());
        };

        let start: Bound<&str> = match cursor.position() {
            Some(member) => Bound::Excluded(member),
            None => Bound::Unbounded,
        };

        let mut members = Vec::new();
        let mut last_scanned: Option<&str> = None;
        for (member, _score) in zset.range::<str, _>((start, Bound::Unbounded)) {
            last_scanned = Some(member);
            if pattern.map_or(true, |p| match_pattern::matches(p, member)) {
                members.push(member.clone());
                if members.len() == count {
                    break;
                }
            }
        }

        let next = match last_scanned {
            Some(member)
                if zset
                    .range::<str, _>((Bound::Excluded(member), Bound::Unbounded))
                    .next()
                    .is_some() =>
            {
                ScanCursor::after(member)
            }
            _ => ScanCursor::exhausted(),
        };

        Ok(ScanBatch { members, cursor: next })
    }

    fn watch(&mut self, keys: &[String]) -> StoreResult<()> {
        let versions: Vec<(String, u64)> = {
            let state = self.lock()?;
            keys.iter().map(|key| (key.clone(), state.version(key))).collect()
        };
        self.watches.extend(versions);
        Ok(())
    }

    fn unwatch(&mut self) -> StoreResult<()> {
        self.watches.clear();
        Ok(())
    }

    fn transaction<R>(
        &mut self,
        body: impl FnOnce(&mut Self::Tx<'_>) -> StoreResult<R>,
    ) -> StoreResult<Option<R>> {
        let mut tx = MemoryTx { ops: Vec::new() };
        let result = body(&mut tx);
        // Watches are consumed whether the commit happens or not.
        let watches = std::mem::take(&mut self.watches);
        let value = result?;

        let mut state = self.lock()?;
        for (key, version) in &watches {
            if state.version(key) != *version {
                return Ok(None);
            }
        }
        for op in tx.ops {
            state.apply(op);
        }
        Ok(Some(value))
    }

    fn pipeline<R>(
        &mut self,
        body: impl FnOnce(&mut Self::Pipe<'_>) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut pipe = MemoryPipe { ops: Vec::new() };
        let value = body(&mut pipe)?;
        // One round trip, but each command lands independently.
        for op in pipe.ops {
            let mut state = self.lock()?;
            state.apply(op);
        }
        Ok(value)
    }
}

/// The write queue of an open transaction.
pub struct MemoryTx {
    ops: Vec<WriteOp>,
}

impl StoreTransaction for MemoryTx {
    fn hset(&mut self, key: &str, fields: &FieldMap) -> StoreResult<()> {
        self.ops.push(WriteOp::HSet { key: key.to_owned(), fields: fields.clone() });
        Ok(())
    }

    fn del(&mut self, key: &str) -> StoreResult<()> {
        self.ops.push(WriteOp::Del { key: key.to_owned() });
        Ok(())
    }

    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<()> {
        self.ops.push(WriteOp::ZAdd { key: key.to_owned(), score, member: member.to_owned() });
        Ok(())
    }

    fn zrem(&mut self, key: &str, members: &[String]) -> StoreResult<()> {
        self.ops.push(WriteOp::ZRem { key: key.to_owned(), members: members.to_vec() });
        Ok(())
    }
}

/// The write queue of an open pipeline.
pub struct MemoryPipe {
    ops: Vec<WriteOp>,
}

impl StorePipeline for MemoryPipe {
    fn hset(&mut self, key: &str, fields: &FieldMap) -> StoreResult<()> {
        self.ops.push(WriteOp::HSet { key: key.to_owned(), fields: fields.clone() });
        Ok(())
    }

    fn del(&mut self, key: &str) -> StoreResult<()> {
        self.ops.push(WriteOp::Del { key: key.to_owned() });
        Ok(())
    }

    fn zadd(&mut self, key: &str, score: f64, member: &str) -> StoreResult<()> {
        self.ops.push(WriteOp::ZAdd { key: key.to_owned(), score, member: member.to_owned() });
        Ok(())
    }

    fn zrem(&mut self, key: &str, members: &[String]) -> StoreResult<()> {
        self.ops.push(WriteOp::ZRem { key: key.to_owned(), members: members.to_vec() });
        Ok(())
    }
}
