//! Logical namespaces for entity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical namespace grouping all keys belonging to one entity type.
///
/// A keyspace is bound to a repository at construction time. It maps to
/// exactly one index (the `keyspace:all` sorted set), one counter
/// (`keyspace:nextId`), and one hash-key family (`keyspace:id`).
///
/// # Constraints
///
/// The `:` delimiter must not appear in a raw keyspace name: the key
/// scheme relies on it to keep `(keyspace, id)` pairs injective and
/// does not escape it. Likewise the names `all` and `nextId` are
/// reserved as id values inside a keyspace (counter-assigned ids are
/// decimal and can never collide with them). Both constraints are
/// documented rather than enforced.
///
/// # Example
///
/// ```
/// use corraldb_core::Keyspace;
///
/// let orders = Keyspace::new("orders");
/// assert_eq!(orders.as_str(), "orders");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyspace(String);

impl Keyspace {
    /// Create a new keyspace.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the keyspace name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Keyspace {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Keyspace {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Keyspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
