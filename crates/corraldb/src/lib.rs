//! `CorralDB`
//!
//! A typed repository layer over a hash + sorted-set key-value store:
//! CRUD, counting, and stable cursor-based pagination for entities
//! physically stored as per-entity field maps plus a per-keyspace
//! ordering index, with optimistic-concurrency-controlled writes.
//!
//! # Overview
//!
//! Each entity type binds to one keyspace. An entity lives as a hash
//! record under `keyspace:id`; the keyspace's sorted set
//! (`keyspace:all`) indexes every id by last-modified timestamp and
//! doubles as the pagination substrate; `keyspace:nextId` allocates
//! ids. The [`Repository`] keeps the two store structures consistent:
//! every save commits the hash write and the index upsert in one
//! transaction watched on the entity's own key, so readers never
//! observe one without the other.
//!
//! The store itself is external, reached through the narrow command
//! surface in [`corraldb_store`]; the in-memory reference backend in
//! [`backends`] stands in for a server in tests and examples.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use corraldb::backends::MemoryStore;
//! use corraldb::{Keyspace, PageRequest, Repository, StoreClient, StoreConfig};
//!
//! let client = StoreClient::connect(MemoryStore::new(), &StoreConfig::default())?;
//! let repo = Repository::new(Arc::new(client), Keyspace::new("orders"), OrderCodec);
//!
//! let saved = repo.save(order)?;                       // id + stamps assigned
//! let found = repo.find_by_id(saved.id())?;            // Ok(None) when absent
//! let page = repo.find_page(&PageRequest::of(20), None)?;
//! let next = repo.find_page(&PageRequest::with_cursor(page.cursor().clone(), 20), None)?;
//! ```
//!
//! See [`Repository`] for a complete, runnable example including the
//! entity and codec definitions.
//!
//! # Concurrency Model
//!
//! Calls are synchronous and blocking; concurrency comes entirely from
//! callers invoking a shared repository from their own threads. The
//! connection pool is the only shared mutable resource and its size
//! ceiling is the backpressure signal. All consistency comes from the
//! store's own atomic primitives (idempotent upsert, watch/multi/exec);
//! the layer adds no client-side locking.
//!
//! # Error Handling
//!
//! Absence is never an error: lookups return `Ok(None)` and an
//! exhausted scan is an empty page with `has_more == false`. The
//! [`enum@Error`] taxonomy distinguishes a refused optimistic commit
//! ([`Error::Conflict`]) from genuine absence, surfaces the disabled
//! gate explicitly, and classifies connection failures as retryable.

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod repository;

// Re-export the vocabulary types so applications depend on one crate.
pub use corraldb_core::{
    keys, CoreError, Entity, EntityCodec, EntityId, FieldMap, Keyspace, Page, PageRequest,
    ScanCursor, Timestamp,
};
pub use corraldb_store::backends;
pub use corraldb_store::{
    ScanBatch, StoreBackend, StoreClient, StoreConfig, StoreConnection, StoreError,
    StorePipeline, StoreResult, StoreTransaction,
};

pub use error::{Error, Result};
pub use repository::Repository;
