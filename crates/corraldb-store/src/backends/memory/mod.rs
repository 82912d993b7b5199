//! In-memory store backend.
//!
//! This module provides a reference implementation of the store command
//! surface backed by process memory: hashes, sorted sets, counters,
//! per-key version stamps for watch, and queued multi/exec applied
//! atomically under one state lock.
//!
//! The backend exists so the repository layer can be exercised without
//! a store server. It honors the same observable semantics a networked
//! store would:
//!
//! - `hset` rewrites the whole record; `hgetall` of a missing key is an
//!   empty field map
//! - `incr` is atomic across connections
//! - `zadd` is an idempotent upsert; `zcard` of a missing key is zero
//! - `scan` visits members in member order with a resume-after cursor:
//!   a member present and unmoved for the whole scan is returned
//!   exactly once, and a cursor replayed after the index shrank
//!   terminates as exhausted
//! - a transaction's queued writes apply all-or-nothing, and commit is
//!   refused if any watched key was written after the watch began
//!
//! # Example
//!
//! ```
//! use corraldb_store::backends::MemoryStore;
//! use corraldb_store::{StoreBackend, StoreConnection};
//!
//! let store = MemoryStore::new();
//! let mut conn = store.connect()?;
//!
//! conn.zadd("orders:all", 1.0, "1")?;
//! conn.zadd("orders:all", 2.0, "2")?;
//! assert_eq!(conn.zcard("orders:all")?, 2);
//! # Ok::<(), corraldb_store::StoreError>(())
//! ```

mod conn;
mod store;

pub use conn::MemoryConn;
pub use store::MemoryStore;
