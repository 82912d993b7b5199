//! The hash-record shape of a persisted entity.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// A string-keyed field map, the shape an entity is persisted as.
///
/// A field map corresponds one-to-one with a hash record in the store:
/// every declared field of an entity has a deterministic string
/// representation. Fields iterate in key order.
///
/// The typed accessors return [`CoreError::MissingField`] for absent
/// fields and [`CoreError::InvalidField`] for unparseable values, so
/// codecs can use `?` throughout.
///
/// # Example
///
/// ```
/// use corraldb_core::FieldMap;
///
/// let mut fields = FieldMap::new();
/// fields.set("name", "Alice");
/// fields.set_i64("age", 30);
///
/// assert_eq!(fields.get("name"), Some("Alice"));
/// assert_eq!(fields.get_i64("age").unwrap(), 30);
/// assert!(fields.get_i64("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: BTreeMap<String, String>,
}

impl FieldMap {
    /// Create an empty field map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the map holds no fields.
    ///
    /// An empty map is indistinguishable from a missing key at the
    /// store level; readers treat it as "not found" before any codec
    /// runs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set a field to a raw string value.
    #[inline]
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Set an integer field.
    #[inline]
    pub fn set_i64(&mut self, field: impl Into<String>, value: i64) {
        self.set(field, value.to_string());
    }

    /// Set a float field.
    #[inline]
    pub fn set_f64(&mut self, field: impl Into<String>, value: f64) {
        self.set(field, value.to_string());
    }

    /// Set a boolean field.
    #[inline]
    pub fn set_bool(&mut self, field: impl Into<String>, value: bool) {
        self.set(field, value.to_string());
    }

    /// Set a timestamp field (epoch milliseconds).
    #[inline]
    pub fn set_timestamp(&mut self, field: impl Into<String>, value: Timestamp) {
        self.set_i64(field, value.as_millis());
    }

    /// Get a field as a raw string, or `None` if absent.
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Get a required string field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the field is absent.
    pub fn get_str(&self, field: &str) -> Result<&str, CoreError> {
        self.get(field).ok_or_else(|| CoreError::missing_field(field))
    }

    /// Get a required integer field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the field is absent, or
    /// [`CoreError::InvalidField`] if the value does not parse.
    pub fn get_i64(&self, field: &str) -> Result<i64, CoreError> {
        let raw = self.get_str(field)?;
        raw.parse().map_err(|_| CoreError::invalid_field(field, "i64", raw))
    }

    /// Get a required float field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the field is absent, or
    /// [`CoreError::InvalidField`] if the value does not parse.
    pub fn get_f64(&self, field: &str) -> Result<f64, CoreError> {
        let raw = self.get_str(field)?;
        raw.parse().map_err(|_| CoreError::invalid_field(field, "f64", raw))
    }

    /// Get a required boolean field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the field is absent, or
    /// [`CoreError::InvalidField`] if the value does not parse.
    pub fn get_bool(&self, field: &str) -> Result<bool, CoreError> {
        let raw = self.get_str(field)?;
        raw.parse().map_err(|_| CoreError::invalid_field(field, "bool", raw))
    }

    /// Get a required timestamp field (epoch milliseconds).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the field is absent, or
    /// [`CoreError::InvalidField`] if the value does not parse.
    pub fn get_timestamp(&self, field: &str) -> Result<Timestamp, CoreError> {
        Ok(Timestamp::from_millis(self.get_i64(field)?))
    }

    /// Iterate over `(field, value)` pairs in key order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
