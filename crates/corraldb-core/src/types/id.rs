//! Unique identifiers for stored entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity within its keyspace.
///
/// Identifiers are strings. On first save the repository assigns one
/// from the keyspace counter (a decimal rendering of the incremented
/// value); application code may also supply its own ids, subject to
/// the key-scheme constraint that the `:` delimiter must not appear in
/// raw id values (see [`crate::keys`]).
///
/// An id is immutable once assigned: saving an entity never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new `EntityId` from a raw string value.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create an `EntityId` from a keyspace counter value.
    ///
    /// Counter-assigned ids are the decimal rendering of the value
    /// returned by the store's atomic increment.
    #[inline]
    #[must_use]
    pub fn from_counter(value: i64) -> Self {
        Self(value.to_string())
    }

    /// Get the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
