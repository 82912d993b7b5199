//! Shared state of the in-memory backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use corraldb_core::FieldMap;

use super::conn::MemoryConn;
use crate::conn::StoreBackend;
use crate::error::StoreResult;

/// The in-memory reference backend.
///
/// Cloning a `MemoryStore` shares the underlying state, and every
/// connection opened from it sees the same data - the store plays the
/// role of the server. All mutations go through one internal lock,
/// which is what makes multi/exec atomic here.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn state(&self) -> Arc<Mutex<State>> {
        Arc::clone(&self.state)
    }
}

impl StoreBackend for MemoryStore {
    type Conn = MemoryConn;

    fn connect(&self) -> StoreResult<Self::Conn> {
        Ok(MemoryConn::new(self.state()))
    }
}

/// A queued write inside a transaction or pipeline.
#[derive(Debug, Clone)]
pub(super) enum WriteOp {
    HSet { key: String, fields: FieldMap },
    Del { key: String },
    ZAdd { key: String, score: f64, member: String },
    ZRem { key: String, members: Vec<String> },
}

/// The store's entire keyspace: hashes, sorted sets, counters, and the
/// per-key version stamps that back watch.
#[derive(Default)]
pub(super) struct State {
    pub(super) hashes: HashMap<String, FieldMap>,
    pub(super) zsets: HashMap<String, BTreeMap<String, f64>>,
    pub(super) counters: HashMap<String, i64>,
    versions: HashMap<String, u64>,
    tick: u64,
}

impl State {
    /// Record a write to `key` for watch bookkeeping.
    ///
    /// Version entries outlive deletion so a watch placed before a
    /// delete still detects it.
    fn touch(&mut self, key: &str) {
        self.tick += 1;
        self.versions.insert(key.to_owned(), self.tick);
    }

    /// The current version of `key` (0 if never written).
    pub(super) fn version(&self, key: &str) -> u64 {
        self.versions.get(key).copied().unwrap_or(0)
    }

    /// Apply one queued write.
    pub(super) fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::HSet { key, fields } => {
                self.hashes.insert(key.clone(), fields);
                self.touch(&key);
            }
            WriteOp::Del { key } => {
                let existed = self.hashes.remove(&key).is_some()
                    | self.zsets.remove(&key).is_some()
                    | self.counters.remove(&key).is_some();
                if existed {
                    self.touch(&key);
                }
            }
            WriteOp::ZAdd { key, score, member } => {
                self.zsets.entry(key.clone()).or_default().insert(member, score);
                self.touch(&key);
            }
            WriteOp::ZRem { key, members } => {
                if let Some(zset) = self.zsets.get_mut(&key) {
                    let mut removed = false;
                    for member in &members {
                        removed |= zset.remove(member).is_some();
                    }
                    if zset.is_empty() {
                        self.zsets.remove(&key);
                    }
                    if removed {
                        self.touch(&key);
                    }
                }
            }
        }
    }

    /// Apply a delete, reporting whether the key existed.
    pub(super) fn delete(&mut self, key: &str) -> bool {
        let existed = self.hashes.contains_key(key)
            || self.zsets.contains_key(key)
            || self.counters.contains_key(key);
        self.apply(WriteOp::Del { key: key.to_owned() });
        existed
    }

    /// Atomically increment a counter, returning the new value.
    pub(super) fn increment(&mut self, key: &str) -> i64 {
        let value = self.counters.entry(key.to_owned()).or_insert(0);
        *value += 1;
        let result = *value;
        self.touch(key);
        result
    }
}
