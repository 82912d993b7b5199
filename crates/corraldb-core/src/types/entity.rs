//! The persistence contract implemented by application entity types.

use crate::types::{EntityId, Timestamp};

/// A type that can be stored by a `CorralDB` repository.
///
/// Application types implement this trait to expose the three pieces of
/// state the repository drives: the identifier and the created/modified
/// stamps. Everything else about the type is opaque to the repository
/// and handled by its [`EntityCodec`](crate::codec::EntityCodec).
///
/// The repository assigns the id (from the keyspace counter) and both
/// timestamps on first save, and bumps the modified stamp on every
/// subsequent save. Implementations just store what they are given;
/// the codec persists these values like any other field.
///
/// # Invariants
///
/// - The id is immutable once assigned; `set_id` is only called on an
///   entity whose `id()` is `None`.
/// - `modified_at >= created_at` for every persisted entity.
///
/// # Example
///
/// ```
/// use corraldb_core::{Entity, EntityId, Timestamp};
///
/// #[derive(Clone)]
/// struct Order {
///     id: Option<EntityId>,
///     created: Option<Timestamp>,
///     modified: Option<Timestamp>,
///     item: String,
/// }
///
/// impl Entity for Order {
///     fn id(&self) -> Option<&EntityId> {
///         self.id.as_ref()
///     }
///     fn set_id(&mut self, id: EntityId) {
///         self.id = Some(id);
///     }
///     fn created_at(&self) -> Option<Timestamp> {
///         self.created
///     }
///     fn set_created_at(&mut self, at: Timestamp) {
///         self.created = Some(at);
///     }
///     fn modified_at(&self) -> Option<Timestamp> {
///         self.modified
///     }
///     fn set_modified_at(&mut self, at: Timestamp) {
///         self.modified = Some(at);
///     }
/// }
/// ```
pub trait Entity: Clone + Send {
    /// The entity's identifier, or `None` if it has never been saved.
    fn id(&self) -> Option<&EntityId>;

    /// Record the identifier assigned on first save.
    fn set_id(&mut self, id: EntityId);

    /// When the entity was first saved, or `None` if never saved.
    fn created_at(&self) -> Option<Timestamp>;

    /// Record the creation stamp assigned on first save.
    fn set_created_at(&mut self, at: Timestamp);

    /// When the entity was last saved, or `None` if never saved.
    fn modified_at(&self) -> Option<Timestamp>;

    /// Record the modification stamp assigned on every save.
    fn set_modified_at(&mut self, at: Timestamp);
}
