//! Shared fixtures for repository unit tests.

use std::sync::Arc;

use corraldb_core::{CoreError, Entity, EntityCodec, EntityId, FieldMap, Keyspace, Timestamp};
use corraldb_store::backends::MemoryStore;
use corraldb_store::{StoreClient, StoreConfig};

use super::Repository;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestOrder {
    pub(crate) id: Option<EntityId>,
    pub(crate) created: Option<Timestamp>,
    pub(crate) modified: Option<Timestamp>,
    pub(crate) item: String,
    pub(crate) quantity: i64,
}

impl Entity for TestOrder {
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

pub(crate) struct TestOrderCodec;

impl EntityCodec<TestOrder> for TestOrderCodec {
    fn encode(&self, order: &TestOrder) -> Result<FieldMap, CoreError> {
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

    fn decode(&self, fields: &FieldMap) -> Result<TestOrder, CoreError> {
        Ok(TestOrder {
            id: Some(EntityId::new(fields.get_str("id")?)),
            created: Some(fields.get_timestamp("created")?),
            modified: Some(fields.get_timestamp("modified")?),
            item: fields.get_str("item")?.to_owned(),
            quantity: fields.get_i64("quantity")?,
        })
    }
}

pub(crate) fn order(item: &str, quantity: i64) -> TestOrder {
    TestOrder { id: None, created: None, modified: None, item: item.to_owned(), quantity }
}

pub(crate) fn order_repository(
) -> (MemoryStore, Repository<TestOrder, TestOrderCodec, MemoryStore>) {
    let store = MemoryStore::new();
    let client =
        StoreClient::connect(store.clone(), &StoreConfig::default()).expect("connect failed");
    let repo = Repository::new(Arc::new(client), Keyspace::new("orders"), TestOrderCodec);
    (store, repo)
}
