//! Key derivation for hash records, indexes, and counters.
//!
//! All keys for one entity type share its keyspace as a prefix:
//!
//! - `keyspace:id` - the entity's hash record
//! - `keyspace:all` - the keyspace index (sorted set of ids by
//!   modified-timestamp score)
//! - `keyspace:nextId` - the keyspace's id-allocation counter
//!
//! # Injectivity
//!
//! Key derivation is injective - no two distinct `(keyspace, id)` pairs
//! produce the same key - provided the `:` delimiter does not appear in
//! raw keyspace or id values. This is a documented constraint on
//! [`Keyspace`] and [`EntityId`], not enforced by escaping.

use crate::types::{EntityId, Keyspace};

/// Delimiter between the keyspace prefix and the key suffix.
pub const KEY_DELIMITER: char = ':';

/// Suffix of the keyspace index key.
pub const INDEX_SUFFIX: &str = "all";

/// Suffix of the keyspace counter key.
pub const COUNTER_SUFFIX: &str = "nextId";

/// Derive the hash-record key for an entity.
#[inline]
#[must_use]
pub fn entity_key(keyspace: &Keyspace, id: &EntityId) -> String {
    format!("{}{KEY_DELIMITER}{}", keyspace.as_str(), id.as_str())
}

/// Derive the index key for a keyspace.
#[inline]
#[must_use]
pub fn index_key(keyspace: &Keyspace) -> String {
    format!("{}{KEY_DELIMITER}{INDEX_SUFFIX}", keyspace.as_str())
}

/// Derive the counter key for a keyspace.
#[inline]
#[must_use]
pub fn counter_key(keyspace: &Keyspace) -> String {
    format!("{}{KEY_DELIMITER}{COUNTER_SUFFIX}", keyspace.as_str())
}
