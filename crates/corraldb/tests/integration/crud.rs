//! CRUD integration tests.
//!
//! Basic save/find/delete lifecycles, the index/hash consistency
//! invariant, and a medium-scale pass.

use corraldb::{EntityId, StoreBackend, StoreConnection};

use crate::common::{orders_repository, Order};

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn first_save_assigns_id_and_equal_stamps() {
    let (_store, repo) = orders_repository();

    let saved = repo.save(Order::new("widget", 3)).expect("save failed");

    let id = saved.id.clone().expect("id should be assigned");
    assert!(!id.as_str().is_empty());
    assert_eq!(saved.created, saved.modified);
}

#[test]
fn resave_bumps_modified_and_keeps_identity() {
    let (_store, repo) = orders_repository();

    let saved = repo.save(Order::new("widget", 3)).expect("save failed");
    let id = saved.id.clone();
    let created = saved.created;

    // Cross a millisecond boundary so the stamps can differ.
    std::thread::sleep(std::time::Duration::from_millis(2));

    let mut changed = saved;
    changed.quantity = 7;
    let resaved = repo.save(changed).expect("save failed");

    assert_eq!(resaved.id, id);
    assert_eq!(resaved.created, created);
    assert!(resaved.modified > resaved.created, "modified should move forward");

    let found = repo.find_by_id(&id.expect("id")).expect("find failed").expect("should exist");
    assert_eq!(found.quantity, 7);
}

#[test]
fn find_missing_id_is_none_not_error() {
    let (_store, repo) = orders_repository();
    assert!(repo.find_by_id(&EntityId::new("999")).expect("find failed").is_none());
    assert!(!repo.exists(&EntityId::new("999")).expect("exists failed"));
}

#[test]
fn delete_is_idempotent() {
    let (_store, repo) = orders_repository();

    let saved = repo.save(Order::new("widget", 1)).expect("save failed");
    let id = saved.id.expect("id");

    assert!(repo.delete(&id).expect("delete failed"));
    assert!(!repo.delete(&id).expect("second delete failed"), "second delete is a no-op");
    assert!(!repo.delete(&EntityId::new("ghost")).expect("delete of missing id failed"));

    assert!(repo.find_by_id(&id).expect("find failed").is_none());
    assert_eq!(repo.count().expect("count failed"), 0);
}

// ============================================================================
// Index/hash consistency
// ============================================================================

#[test]
fn save_and_delete_keep_hash_and_index_in_lockstep() {
    let (store, repo) = orders_repository();

    let saved = repo.save(Order::new("widget", 1)).expect("save failed");
    let id = saved.id.clone().expect("id");

    let mut conn = store.connect().expect("connect failed");
    let hash_present = !conn.hgetall(&format!("orders:{id}")).expect("hgetall failed").is_empty();
    let index_present =
        conn.zscore("orders:all", id.as_str()).expect("zscore failed").is_some();
    assert!(hash_present && index_present, "both present after save");

    // The index score is the modified stamp in milliseconds.
    let score = conn.zscore("orders:all", id.as_str()).expect("zscore failed").expect("score");
    let modified = saved.modified.expect("modified").as_millis();
    assert_eq!(score as i64, modified);

    repo.delete(&id).expect("delete failed");
    let hash_present = !conn.hgetall(&format!("orders:{id}")).expect("hgetall failed").is_empty();
    let index_present =
        conn.zscore("orders:all", id.as_str()).expect("zscore failed").is_some();
    assert!(!hash_present && !index_present, "both absent after delete");
}

#[test]
fn delete_all_removes_the_batch() {
    let (_store, repo) = orders_repository();

    let mut saved = Vec::new();
    for i in 0..10 {
        saved.push(repo.save(Order::new(&format!("item-{i}"), i)).expect("save failed"));
    }

    // Delete the even-numbered half, plus one never-saved entity that
    // must be skipped.
    let mut batch: Vec<Order> = saved.iter().step_by(2).cloned().collect();
    batch.push(Order::new("never-saved", 0));
    repo.delete_all(&batch).expect("delete_all failed");

    assert_eq!(repo.count().expect("count failed"), 5);
    for (i, order) in saved.iter().enumerate() {
        let id = order.id.clone().expect("id");
        let present = repo.find_by_id(&id).expect("find failed").is_some();
        assert_eq!(present, i % 2 == 1, "entity {i}");
    }
}

// ============================================================================
// Scale
// ============================================================================

#[test]
fn crud_100_entities() {
    let (_store, repo) = orders_repository();
    let count = 100;

    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let saved = repo.save(Order::new(&format!("item-{i}"), i as i64)).expect("save failed");
        ids.push(saved.id.expect("id"));
    }
    assert_eq!(repo.count().expect("count failed"), count as u64);

    // Read all back.
    for (i, id) in ids.iter().enumerate() {
        let order = repo.find_by_id(id).expect("find failed").expect("should exist");
        assert_eq!(order.quantity, i as i64);
    }

    // Update every other entity.
    for (i, id) in ids.iter().enumerate() {
        if i % 2 == 0 {
            let mut order = repo.find_by_id(id).expect("find failed").expect("should exist");
            order.quantity += 1_000;
            repo.save(order).expect("save failed");
        }
    }
    for (i, id) in ids.iter().enumerate() {
        let order = repo.find_by_id(id).expect("find failed").expect("should exist");
        let expected = if i % 2 == 0 { i as i64 + 1_000 } else { i as i64 };
        assert_eq!(order.quantity, expected);
    }

    // Delete half, verify the rest.
    for id in ids.iter().take(count / 2) {
        assert!(repo.delete(id).expect("delete failed"));
    }
    assert_eq!(repo.count().expect("count failed"), (count / 2) as u64);
    for (i, id) in ids.iter().enumerate() {
        let present = repo.find_by_id(id).expect("find failed").is_some();
        assert_eq!(present, i >= count / 2, "entity {i}");
    }
}
