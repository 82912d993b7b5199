//! Shared fixtures: a sample entity, its codec, and repository setup.

use std::sync::Arc;

use corraldb::backends::MemoryStore;
use corraldb::{
    CoreError, Entity, EntityCodec, EntityId, FieldMap, Keyspace, Repository, StoreClient,
    StoreConfig, Timestamp,
};

/// The entity type used across the integration suite.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: Option<EntityId>,
    pub created: Option<Timestamp>,
    pub modified: Option<Timestamp>,
    pub item: String,
    pub quantity: i64,
}

impl Order {
    pub fn new(item: &str, quantity: i64) -> Self {
        Self { id: None, created: None, modified: None, item: item.to_owned(), quantity }
    }
}

impl Entity for Order {
    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn created_at(&self) -> Option<Timestamp> {
        self.created
    }

    fn set_created_at(&mut self, at: Timestamp) {
        self.created = Some(at);
    }

    fn modified_at(&self) -> Option<Timestamp> {
        self.modified
    }

    fn set_modified_at(&mut self, at: Timestamp) {
        self.modified = Some(at);
    }
}

pub struct OrderCodec;

impl EntityCodec<Order> for OrderCodec {
    fn encode(&self, order: &Order) -> Result<FieldMap, CoreError> {
        let mut fields = FieldMap::new();
        if let Some(id) = &order.id {
            fields.set("id", id.as_str());
        }
        if let Some(created) = order.created {
            fields.set_timestamp("created", created);
        }
        if let Some(modified) = order.modified {
            fields.set_timestamp("modified", modified);
        }
        fields.set("item", &order.item);
        fields.set_i64("quantity", order.quantity);
        Ok(fields)
    }

    fn decode(&self, fields: &FieldMap) -> Result<Order, CoreError> {
        Ok(Order {
            id: Some(EntityId::new(fields.get_str("id")?)),
            created: Some(fields.get_timestamp("created")?),
            modified: Some(fields.get_timestamp("modified")?),
            item: fields.get_str("item")?.to_owned(),
            quantity: fields.get_i64("quantity")?,
        })
    }
}

pub type OrderRepository = Repository<Order, OrderCodec, MemoryStore>;

/// A repository over a fresh store, returning the store handle too so
/// tests can reach underneath the facade.
pub fn orders_repository() -> (MemoryStore, OrderRepository) {
    let store = MemoryStore::new();
    let client =
        StoreClient::connect(store.clone(), &StoreConfig::default()).expect("connect failed");
    let repo = Repository::new(Arc::new(client), Keyspace::new("orders"), OrderCodec);
    (store, repo)
}

/// A repository whose store layer is gated off.
pub fn disabled_repository() -> OrderRepository {
    let client = StoreClient::connect(MemoryStore::new(), &StoreConfig::disabled())
        .expect("connect failed");
    Repository::new(Arc::new(client), Keyspace::new("orders"), OrderCodec)
}
