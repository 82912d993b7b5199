//! The repository facade.
//!
//! [`Repository`] is the public save/find/delete/count/paginate API.
//! It composes the store client, the key scheme, the entity codec, the
//! keyspace index, the transactional writer, and the pagination engine
//! into one typed collection view over the store.
//!
//! # Construction
//!
//! Everything is injected explicitly: the client, the keyspace, and
//! the codec arrive as constructor arguments. There is no runtime type
//! registry and no annotation-driven binding.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use corraldb::backends::MemoryStore;
//! use corraldb::{
//!     CoreError, Entity, EntityCodec, EntityId, FieldMap, Keyspace, PageRequest, Repository,
//!     StoreClient, StoreConfig, Timestamp,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Order {
//!     id: Option<EntityId>,
//!     created: Option<Timestamp>,
//!     modified: Option<Timestamp>,
//!     item: String,
//! }
//!
//! impl Entity for Order {
//!     fn id(&self) -> Option<&EntityId> {
//!         self.id.as_ref()
//!     }
//!     fn set_id(&mut self, id: EntityId) {
//!         self.id = Some(id);
//!     }
//!     fn created_at(&self) -> Option<Timestamp> {
//!         self.created
//!     }
//!     fn set_created_at(&mut self, at: Timestamp) {
//!         self.created = Some(at);
//!     }
//!     fn modified_at(&self) -> Option<Timestamp> {
//!         self.modified
//!     }
//!     fn set_modified_at(&mut self, at: Timestamp) {
//!         self.modified = Some(at);
//!     }
//! }
//!
//! struct OrderCodec;
//!
//! impl EntityCodec<Order> for OrderCodec {
//!     fn encode(&self, order: &Order) -> Result<FieldMap, CoreError> {
//!         let mut fields = FieldMap::new();
//!         if let Some(id) = &order.id {
//!             fields.set("id", id.as_str());
//!         }
//!         if let Some(created) = order.created {
//!             fields.set_timestamp("created", created);
//!         }
//!         if let Some(modified) = order.modified {
//!             fields.set_timestamp("modified", modified);
//!         }
//!         fields.set("item", &order.item);
//!         Ok(fields)
//!     }
//!
//!     fn decode(&self, fields: &FieldMap) -> Result<Order, CoreError> {
//!         Ok(Order {
//!             id: Some(EntityId::new(fields.get_str("id")?)),
//!             created: Some(fields.get_timestamp("created")?),
//!             modified: Some(fields.get_timestamp("modified")?),
//!             item: fields.get_str("item")?.to_owned(),
//!         })
//!     }
//! }
//!
//! let client = StoreClient::connect(MemoryStore::new(), &StoreConfig::default())?;
//! let repo = Repository::new(Arc::new(client), Keyspace::new("orders"), OrderCodec);
//!
//! let order = Order { id: None, created: None, modified: None, item: "widget".to_owned() };
//! let saved = repo.save(order)?;
//! let id = saved.id.clone().expect("assigned on first save");
//!
//! assert!(repo.find_by_id(&id)?.is_some());
//! assert_eq!(repo.count()?, 1);
//!
//! let page = repo.find_page(&PageRequest::of(10), None)?;
//! assert_eq!(page.len(), 1);
//! # Ok::<(), corraldb::Error>(())
//! ```

mod index;
mod page;
mod writer;

#[cfg(test)]
pub(crate) mod testutil;

use std::marker::PhantomData;
use std::sync::Arc;

use corraldb_core::{keys, Entity, EntityCodec, EntityId, Keyspace, Page, PageRequest, ScanCursor};
use corraldb_store::{StoreBackend, StoreClient, StoreConnection, StorePipeline, StoreTransaction};

use crate::error::Result;
use index::KeyspaceIndex;

/// A typed collection view over one keyspace of the store.
///
/// # Thread Safety
///
/// `Repository` is `Send + Sync` when its codec is; clone the
/// [`Arc<StoreClient>`] into as many repositories as needed - they
/// share the client's connection pool, which is the layer's only
/// shared mutable resource.
///
/// # Consistency
///
/// Within one `save` the hash write and index upsert commit together,
/// so readers never observe one without the other. Across entities
/// there is no ordering guarantee, and pagination under concurrent
/// mutation is weakly consistent: an entity present and unmoved for a
/// whole scan is never skipped, while entities added or removed
/// mid-scan may or may not appear.
pub struct Repository<T, C, B>
where
    T: Entity,
    C: EntityCodec<T>,
    B: StoreBackend,
{
    client: Arc<StoreClient<B>>,
    keyspace: Keyspace,
    index: KeyspaceIndex,
    codec: C,
    _entity: PhantomData<fn() -> T>,
}

impl<T, C, B> Repository<T, C, B>
where
    T: Entity,
    C: EntityCodec<T>,
    B: StoreBackend,
{
    /// Create a repository bound to a keyspace and codec.
    pub fn new(client: Arc<StoreClient<B>>, keyspace: Keyspace, codec: C) -> Self {
        let index = KeyspaceIndex::new(&keyspace);
        Self { client, keyspace, index, codec, _entity: PhantomData }
    }

    /// The keyspace this repository is bound to.
    #[must_use]
    pub const fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    /// Save an entity, assigning an id and timestamps on first save.
    ///
    /// Returns the entity with its assigned id and stamps. The hash
    /// record and index entry are written in one optimistic
    /// transaction watched on the entity's own key.
    ///
    /// # Errors
    ///
    /// [`Error::Conflict`](crate::Error::Conflict) if a concurrent
    /// writer touched the same entity between watch and commit
    /// (nothing was written; retry from the top);
    /// [`Error::Disabled`](crate::Error::Disabled) on a disabled
    /// store; connection or serialization errors otherwise.
    pub fn save(&self, entity: T) -> Result<T> {
        writer::save(&self.client, &self.keyspace, &self.index, &self.codec, entity)
    }

    /// Look up an entity by id.
    ///
    /// Absence is not an error, and a disabled store reads as empty.
    ///
    /// # Errors
    ///
    /// Connection errors, or a serialization error if the stored
    /// record does not decode.
    pub fn find_by_id(&self, id: &EntityId) -> Result<Option<T>> {
        if !self.client.is_enabled() {
            return Ok(None);
        }
        let entity_key = keys::entity_key(&self.keyspace, id);
        let fields = self.client.find(|conn| {
            let fields = conn.hgetall(&entity_key)?;
            Ok((!fields.is_empty()).then_some(fields))
        })?;
        match fields {
            Some(fields) => Ok(Some(self.codec.decode(&fields)?)),
            None => Ok(None),
        }
    }

    /// Whether an entity with the given id exists.
    ///
    /// # Errors
    ///
    /// Connection errors.
    pub fn exists(&self, id: &EntityId) -> Result<bool> {
        if !self.client.is_enabled() {
            return Ok(false);
        }
        let entity_key = keys::entity_key(&self.keyspace, id);
        let existed =
            self.client.execute(|conn| Ok(!conn.hgetall(&entity_key)?.is_empty()))?;
        Ok(existed)
    }

    /// Delete an entity by id, removing hash record and index entry
    /// together.
    ///
    /// Returns `true` if the entity existed. Deleting a missing id is
    /// a no-op, not an error, and deleting twice is safe.
    ///
    /// # Errors
    ///
    /// [`Error::Disabled`](crate::Error::Disabled) on a disabled
    /// store; connection errors otherwise.
    pub fn delete(&self, id: &EntityId) -> Result<bool> {
        let entity_key = keys::entity_key(&self.keyspace, id);
        let existed = self.client.execute(|conn| {
            let existed = !conn.hgetall(&entity_key)?.is_empty();
            let committed = conn.transaction(|tx| {
                tx.del(&entity_key)?;
                self.index.remove(tx, id)
            })?;
            // No watches were opened, so the commit cannot be refused.
            debug_assert!(committed.is_some());
            Ok(existed)
        })?;
        Ok(existed)
    }

    /// Delete a batch of entities in one pipelined round trip.
    ///
    /// Batched but not transactional: a partial failure may remove a
    /// hash without its index entry or vice versa. Readers reconcile
    /// the torn state lazily - a dangling index member reads as "not
    /// found" and is skipped by pagination, never surfaced as a crash.
    /// Entities that were never saved (no id) are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Disabled`](crate::Error::Disabled) on a disabled
    /// store; connection errors otherwise.
    pub fn delete_all(&self, entities: &[T]) -> Result<()> {
        self.client.pipeline(|pipe| {
            for entity in entities {
                if let Some(id) = entity.id() {
                    pipe.del(&keys::entity_key(&self.keyspace, id))?;
                    self.index.remove_batched(pipe, id)?;
                }
            }
            Ok(())
        })?;
        Ok(())
    }

    /// The number of entities in the keyspace, from the index
    /// cardinality - no scan involved.
    ///
    /// # Errors
    ///
    /// Connection errors.
    pub fn count(&self) -> Result<u64> {
        if !self.client.is_enabled() {
            return Ok(0);
        }
        let count = self.client.execute(|conn| self.index.cardinality(conn))?;
        Ok(count)
    }

    /// Fetch every entity in the keyspace, optionally narrowed by a
    /// glob filter on ids.
    ///
    /// Scans the index to completion; order is store scan order, not
    /// score order. Prefer [`Self::find_page`] for large keyspaces.
    ///
    /// # Errors
    ///
    /// Connection errors, or a serialization error if a stored record
    /// does not decode.
    pub fn find_all(&self, filter: Option<&str>) -> Result<Vec<T>> {
        if !self.client.is_enabled() {
            return Ok(Vec::new());
        }
        let records = self.client.execute(|conn| {
            page::scan_all_raw(conn, &self.index, &self.keyspace, filter)
        })?;
        records.iter().map(|fields| Ok(self.codec.decode(fields)?)).collect()
    }

    /// Fetch one page of entities.
    ///
    /// One index scan batch plus one hash fetch per returned id - the
    /// fan-out is the documented cost model. The page carries the
    /// continuation cursor and the index cardinality; an empty page
    /// with `has_more == false` is the terminal, successful case.
    ///
    /// # Errors
    ///
    /// Connection errors, or a serialization error if a stored record
    /// does not decode.
    pub fn find_page(&self, request: &PageRequest, filter: Option<&str>) -> Result<Page<T>> {
        if !self.client.is_enabled() {
            return Ok(Page::new(Vec::new(), ScanCursor::exhausted(), false, 0, request.size()));
        }
        let raw = self.client.execute(|conn| {
            page::fetch_raw_page(conn, &self.index, &self.keyspace, request, filter)
        })?;

        let mut content = Vec::with_capacity(raw.records.len());
        for record in &raw.records {
            content.push(self.codec.decode(record)?);
        }
        Ok(Page::new(content, raw.cursor, raw.has_more, raw.total, raw.size))
    }
}
