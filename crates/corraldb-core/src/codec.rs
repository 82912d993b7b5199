//! The codec contract converting typed entities to and from field maps.
//!
//! Each entity type gets one statically-typed codec. There is no
//! reflection or generic serialization in the persistence path: the
//! codec spells out every field, which keeps the persisted shape an
//! explicit, reviewable contract.
//!
//! # Round-trip law
//!
//! For every entity `e` written by this system,
//! `decode(&encode(&e)?)? == e` on all declared fields. Encoding is
//! total; decoding is its left inverse.
//!
//! Codecs never see an empty field map: the repository maps an empty
//! hash reply to "not found" before decoding, because an empty map
//! cannot be distinguished from a missing key at the store level.

use crate::error::CoreError;
use crate::types::FieldMap;

/// Converts a typed entity to and from its hash-record shape.
///
/// # Example
///
/// ```
/// use corraldb_core::{CoreError, EntityCodec, EntityId, FieldMap, Timestamp};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Order {
///     id: Option<EntityId>,
///     created: Option<Timestamp>,
///     modified: Option<Timestamp>,
///     item: String,
///     quantity: i64,
/// }
///
/// struct OrderCodec;
///
/// impl EntityCodec<Order> for OrderCodec {
///     fn encode(&self, order: &Order) -> Result<FieldMap, CoreError> {
///         let mut fields = FieldMap::new();
///         if let Some(id) = &order.id {
///             fields.set("id", id.as_str());
///         }
///         if let Some(created) = order.created {
///             fields.set_timestamp("created", created);
///         }
///         if let Some(modified) = order.modified {
///             fields.set_timestamp("modified", modified);
///         }
///         fields.set("item", &order.item);
///         fields.set_i64("quantity", order.quantity);
///         Ok(fields)
///     }
///
///     fn decode(&self, fields: &FieldMap) -> Result<Order, CoreError> {
///         Ok(Order {
///             id: Some(EntityId::new(fields.get_str("id")?)),
///             created: Some(fields.get_timestamp("created")?),
///             modified: Some(fields.get_timestamp("modified")?),
///             item: fields.get_str("item")?.to_owned(),
///             quantity: fields.get_i64("quantity")?,
///         })
///     }
/// }
///
/// let codec = OrderCodec;
/// let order = Order {
///     id: Some(EntityId::new("7")),
///     created: Some(Timestamp::from_millis(1_000)),
///     modified: Some(Timestamp::from_millis(2_000)),
///     item: "widget".to_owned(),
///     quantity: 3,
/// };
/// let decoded = codec.decode(&codec.encode(&order).unwrap()).unwrap();
/// assert_eq!(decoded, order);
/// ```
pub trait EntityCodec<T>: Send + Sync {
    /// Encode an entity as a field map.
    ///
    /// Encoding must be total: every declared field has a deterministic
    /// string representation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if a field cannot be represented.
    fn encode(&self, entity: &T) -> Result<FieldMap, CoreError>;

    /// Decode an entity from a field map.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] or [`CoreError::InvalidField`]
    /// if the map does not match the entity's declared shape.
    fn decode(&self, fields: &FieldMap) -> Result<T, CoreError>;
}
