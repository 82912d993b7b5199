//! Basic usage example for CorralDB.
//!
//! This example demonstrates:
//! - Defining an entity type and its codec
//! - Saving entities (ids and timestamps are assigned for you)
//! - Looking entities up, counting, and deleting
//! - Walking the keyspace with cursor-based pagination
//!
//! Run with: `cargo run --example basic_usage`

use std::sync::Arc;

use corraldb::backends::MemoryStore;
use corraldb::{
    CoreError, Entity, EntityCodec, EntityId, Error, FieldMap, Keyspace, PageRequest, Repository,
    StoreClient, StoreConfig, Timestamp,
};

#[derive(Clone, Debug)]
struct Order {
    id: Option<EntityId>,
    created: Option<Timestamp>,
    modified: Option<Timestamp>,
    item: String,
    quantity: i64,
}

impl Order {
    fn new(item: &str, quantity: i64) -> Self {
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

struct OrderCodec;

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

fn main() -> Result<(), Error> {
    // The in-memory backend stands in for a store server here.
    // In production, connect the client to your networked backend.
    let client = StoreClient::connect(MemoryStore::new(), &StoreConfig::default())?;
    let repo = Repository::new(Arc::new(client), Keyspace::new("orders"), OrderCodec);

    println!("CorralDB Basic Usage Example");
    println!("============================\n");

    // Save a batch of orders; ids and stamps are assigned on save.
    for i in 1..=45 {
        repo.save(Order::new(&format!("item-{i}"), i))?;
    }
    println!("Saved {} orders", repo.count()?);

    // Look one up and modify it.
    let id = EntityId::new("7");
    if let Some(mut order) = repo.find_by_id(&id)? {
        println!("Order {}: {} x{}", id, order.item, order.quantity);
        order.quantity += 1;
        repo.save(order)?;
    }

    // Walk the keyspace in pages of 20.
    let mut request = PageRequest::of(20);
    let mut page_number = 0;
    loop {
        let page = repo.find_page(&request, None)?;
        page_number += 1;
        println!(
            "Page {page_number}: {} of {} orders (more: {})",
            page.len(),
            page.total_elements(),
            page.has_more()
        );
        if !page.has_more() {
            break;
        }
        request = PageRequest::with_cursor(page.cursor().clone(), 20);
    }

    // Clean up a batch in one pipelined round trip.
    let stale = repo.find_all(Some("1*"))?;
    println!("\nDeleting {} orders with ids starting in 1", stale.len());
    repo.delete_all(&stale)?;
    println!("{} orders remain", repo.count()?);

    Ok(())
}
