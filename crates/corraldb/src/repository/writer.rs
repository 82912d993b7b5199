//! The transactional save path.
//!
//! Saving walks a small state machine:
//!
//! 1. An entity with no id gets one from the keyspace counter
//!    (`INCR keyspace:nextId`) and both stamps set to now; an entity
//!    that already has an id gets only its modified stamp bumped (a
//!    missing created stamp is backfilled on first persist).
//! 2. A watch opens on the entity's own key, then one transaction
//!    writes the hash record and upserts the index entry with the new
//!    modified score.
//! 3. Commit. If the watched key was written concurrently the commit
//!    is refused, nothing lands, and the save reports
//!    [`Error::Conflict`]; the caller may retry from the top.
//!
//! Failure ordering: a counter or connection failure aborts before any
//! hash or index write, so no partial state becomes visible. The hash
//! write and index upsert are issued inside one transaction, so readers
//! never observe one without the other.

use corraldb_core::{keys, Entity, EntityCodec, EntityId, Keyspace, Timestamp};
use corraldb_store::{StoreBackend, StoreClient, StoreConnection, StoreTransaction};

use super::index::KeyspaceIndex;
use crate::error::{Error, Result};

pub(crate) fn save<T, C, B>(
    client: &StoreClient<B>,
    keyspace: &Keyspace,
    index: &KeyspaceIndex,
    codec: &C,
    mut entity: T,
) -> Result<T>
where
    T: Entity,
    C: EntityCodec<T>,
    B: StoreBackend,
{
    let now = Timestamp::now();

    let id = match entity.id() {
        Some(id) => {
            let id = id.clone();
            if entity.created_at().is_none() {
                entity.set_created_at(now);
            }
            entity.set_modified_at(now);
            id
        }
        None => {
            let counter_key = keys::counter_key(keyspace);
            let next = client.execute(|conn| conn.incr(&counter_key))?;
            let id = EntityId::from_counter(next);
            tracing::debug!(keyspace = %keyspace, id = %id, "assigned entity id");
            entity.set_id(id.clone());
            entity.set_created_at(now);
            entity.set_modified_at(now);
            id
        }
    };

    // Encode before opening the watch so codec failures abort cleanly.
    let fields = codec.encode(&entity)?;
    let entity_key = keys::entity_key(keyspace, &id);

    let committed = client.transaction(&[entity_key.clone()], |tx| {
        tx.hset(&entity_key, &fields)?;
        index.upsert(tx, &id, now)
    })?;

    match committed {
        Some(()) => Ok(entity),
        None => Err(Error::Conflict),
    }
}
