//! `CorralDB` Store
//!
//! This crate provides the store command surface and backend
//! implementations for `CorralDB`.
//!
//! # Overview
//!
//! The repository layer speaks to the underlying key-value store
//! through a narrow command interface: hash reads and writes, an atomic
//! counter, sorted-set index maintenance, cursor scans, and an
//! optimistic transaction envelope (watch + multi + exec). This crate
//! defines that interface as traits, and wraps it in a [`StoreClient`]
//! that handles connection pooling and the enabled/disabled gate.
//!
//! # Core Traits
//!
//! - [`StoreBackend`] - Opens connections to one store
//! - [`StoreConnection`] - The command surface on one connection
//! - [`StoreTransaction`] - The write queue inside a multi/exec body
//! - [`StorePipeline`] - Batched non-atomic dispatch
//!
//! # Error Handling
//!
//! All operations return [`StoreResult<T>`], an alias for
//! `Result<T, StoreError>`. Low-level failures are wrapped once at this
//! boundary; layers above see the [`StoreError`] taxonomy unchanged.
//! A refused optimistic commit is *not* an error here - it is the
//! `Ok(None)` result of [`StoreClient::transaction`].
//!
//! # Example
//!
//! ```
//! use corraldb_store::backends::MemoryStore;
//! use corraldb_store::{StoreClient, StoreConfig, StoreConnection};
//! use corraldb_core::FieldMap;
//!
//! let client = StoreClient::connect(MemoryStore::new(), &StoreConfig::default())?;
//!
//! client.execute(|conn| {
//!     let mut fields = FieldMap::new();
//!     fields.set("name", "Alice");
//!     conn.hset("people:1", &fields)
//! })?;
//!
//! let found = client.find(|conn| {
//!     let fields = conn.hgetall("people:1")?;
//!     Ok((!fields.is_empty()).then_some(fields))
//! })?;
//! assert!(found.is_some());
//! # Ok::<(), corraldb_store::StoreError>(())
//! ```
//!
//! # Modules
//!
//! - [`conn`] - Command-surface traits and the scan batch type
//! - [`client`] - The pooled [`StoreClient`]
//! - [`pool`] - Bounded connection pool
//! - [`config`] - [`StoreConfig`] recognized options
//! - [`backends`] - Concrete backend implementations
//! - [`match_pattern`] - Glob matching for scan filters

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod client;
pub mod config;
pub mod conn;
pub mod error;
pub mod match_pattern;
pub mod pool;

pub use client::StoreClient;
pub use config::StoreConfig;
pub use conn::{ScanBatch, StoreBackend, StoreConnection, StorePipeline, StoreTransaction};
pub use error::{StoreError, StoreResult};
pub use pool::{ConnectionPool, PooledConn};
