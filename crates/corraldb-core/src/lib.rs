//! `CorralDB` Core
//!
//! This crate provides the fundamental types shared by the `CorralDB`
//! repository layer: identifiers, keyspaces, timestamps, field maps,
//! and the codec contract that turns typed entities into hash records.
//!
//! # Overview
//!
//! `CorralDB` stores each entity as a string-keyed field map (a "hash
//! record") under `keyspace:id`, and keeps one sorted-set index per
//! keyspace (`keyspace:all`) whose members are entity ids and whose
//! scores are last-modified timestamps. The types in this crate define
//! that vocabulary:
//!
//! - **Identifiers**: [`EntityId`], assigned from the keyspace counter
//!   on first save
//! - **Namespaces**: [`Keyspace`], the prefix grouping all keys of one
//!   entity type
//! - **Timestamps**: [`Timestamp`], milliseconds since the Unix epoch
//! - **Hash records**: [`FieldMap`], the persisted shape of an entity
//! - **The persistence contract**: the [`Entity`] trait implemented by
//!   application types, and the [`EntityCodec`] trait converting them
//!   to and from field maps
//! - **Pagination**: [`PageRequest`], [`Page`], and the opaque
//!   [`ScanCursor`] continuation token
//!
//! # Example
//!
//! ```
//! use corraldb_core::{keys, EntityId, Keyspace};
//!
//! let orders = Keyspace::new("orders");
//! let id = EntityId::new("42");
//!
//! assert_eq!(keys::entity_key(&orders, &id), "orders:42");
//! assert_eq!(keys::index_key(&orders), "orders:all");
//! assert_eq!(keys::counter_key(&orders), "orders:nextId");
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core data types ([`EntityId`], [`Keyspace`], [`Timestamp`], [`FieldMap`])
//! - [`keys`] - The key scheme deriving storage keys from keyspace and id
//! - [`codec`] - The [`EntityCodec`] contract
//! - [`page`] - Pagination vocabulary ([`PageRequest`], [`Page`], [`ScanCursor`])
//! - [`error`] - Error types ([`CoreError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod codec;
pub mod error;
pub mod keys;
pub mod page;
pub mod types;

// Re-export commonly used types
pub use codec::EntityCodec;
pub use error::CoreError;
pub use page::{Page, PageRequest, ScanCursor};
pub use types::{Entity, EntityId, FieldMap, Keyspace, Timestamp};
