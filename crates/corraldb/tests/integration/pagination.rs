//! Pagination integration tests.
//!
//! The concrete 45-entity scenario, completeness against `find_all`
//! and `count`, cursor resume under deletion, and filters.

use std::collections::BTreeSet;

use corraldb::{PageRequest, ScanCursor};

use crate::common::{orders_repository, Order, OrderRepository};

fn seed(repo: &OrderRepository, count: usize) -> Vec<corraldb::EntityId> {
    (0..count)
        .map(|i| {
            repo.save(Order::new(&format!("item-{i}"), i as i64))
                .expect("save failed")
                .id
                .expect("id")
        })
        .collect()
}

#[test]
fn forty_five_orders_in_pages_of_twenty() {
    let (_store, repo) = orders_repository();
    seed(&repo, 45);

    let first = repo.find_page(&PageRequest::of(20), None).expect("page failed");
    assert_eq!(first.len(), 20);
    assert!(first.has_more());
    assert_eq!(first.total_elements(), 45);
    assert_eq!(first.total_pages(), 3);

    let second = repo
        .find_page(&PageRequest::with_cursor(first.cursor().clone(), 20), None)
        .expect("page failed");
    assert_eq!(second.len(), 20);
    assert!(second.has_more());
    assert_eq!(second.total_elements(), 45);

    let third = repo
        .find_page(&PageRequest::with_cursor(second.cursor().clone(), 20), None)
        .expect("page failed");
    assert_eq!(third.len(), 5);
    assert!(!third.has_more());
    assert_eq!(third.total_elements(), 45);
    assert!(third.cursor().is_exhausted());
}

#[test]
fn paged_content_matches_find_all_and_count() {
    let (_store, repo) = orders_repository();
    seed(&repo, 33);

    let mut paged_ids = BTreeSet::new();
    let mut request = PageRequest::of(7);
    loop {
        let page = repo.find_page(&request, None).expect("page failed");
        for order in page.content() {
            let id = order.id.clone().expect("id");
            assert!(paged_ids.insert(id), "no entity appears twice");
        }
        if !page.has_more() {
            break;
        }
        request = PageRequest::with_cursor(page.cursor().clone(), 7);
    }

    let all_ids: BTreeSet<_> = repo
        .find_all(None)
        .expect("find_all failed")
        .into_iter()
        .map(|o| o.id.expect("id"))
        .collect();

    assert_eq!(paged_ids, all_ids);
    assert_eq!(paged_ids.len() as u64, repo.count().expect("count failed"));
}

#[test]
fn empty_keyspace_yields_a_terminal_empty_page() {
    let (_store, repo) = orders_repository();

    let page = repo.find_page(&PageRequest::of(20), None).expect("page failed");
    assert!(page.is_empty());
    assert!(!page.has_more());
    assert_eq!(page.total_elements(), 0);
    assert_eq!(page.total_pages(), 0);
}

#[test]
fn cursor_survives_deletions_behind_it() {
    let (_store, repo) = orders_repository();
    let ids = seed(&repo, 10);

    let first = repo.find_page(&PageRequest::of(4), None).expect("page failed");
    let first_ids: Vec<_> =
        first.content().iter().map(|o| o.id.clone().expect("id")).collect();

    // Delete everything the first page already returned.
    for id in &first_ids {
        repo.delete(id).expect("delete failed");
    }

    // The remaining entities, unmoved for the whole scan, all appear.
    let mut seen = BTreeSet::new();
    let mut request = PageRequest::with_cursor(first.cursor().clone(), 4);
    loop {
        let page = repo.find_page(&request, None).expect("page failed");
        seen.extend(page.content().iter().map(|o| o.id.clone().expect("id")));
        if !page.has_more() {
            break;
        }
        request = PageRequest::with_cursor(page.cursor().clone(), 4);
    }

    let expected: BTreeSet<_> =
        ids.into_iter().filter(|id| !first_ids.contains(id)).collect();
    assert_eq!(seen, expected);
}

#[test]
fn cursor_past_a_shrunken_index_terminates_exhausted() {
    let (_store, repo) = orders_repository();
    let ids = seed(&repo, 6);

    let first = repo.find_page(&PageRequest::of(3), None).expect("page failed");
    assert!(first.has_more());

    // The index shrinks below the cursor's logical position.
    for id in &ids {
        repo.delete(id).expect("delete failed");
    }

    let resumed = repo
        .find_page(&PageRequest::with_cursor(first.cursor().clone(), 3), None)
        .expect("resume must not error");
    assert!(resumed.is_empty());
    assert!(!resumed.has_more());
    assert!(resumed.cursor().is_exhausted());
}

#[test]
fn match_filter_applies_to_scan_and_find_all() {
    let (_store, repo) = orders_repository();
    seed(&repo, 12); // ids 1..=12

    let filtered = repo.find_all(Some("1*")).expect("find_all failed");
    let mut ids: Vec<_> =
        filtered.iter().map(|o| o.id.clone().expect("id").as_str().to_owned()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "10", "11", "12"]);

    let page = repo.find_page(&PageRequest::of(50), Some("1*")).expect("page failed");
    assert_eq!(page.len(), 4);
}

#[test]
fn continuation_token_replays_across_a_serialization_boundary() {
    let (_store, repo) = orders_repository();
    seed(&repo, 10);

    let first = repo.find_page(&PageRequest::of(4), None).expect("page failed");
    let first_ids: BTreeSet<_> =
        first.content().iter().map(|o| o.id.clone().expect("id")).collect();

    // Hand the token to a "client" and back, as an HTTP API would.
    let token = serde_json::to_string(first.cursor()).expect("serialize failed");
    let cursor: ScanCursor = serde_json::from_str(&token).expect("deserialize failed");

    let second = repo
        .find_page(&PageRequest::with_cursor(cursor, 4), None)
        .expect("page failed");
    assert_eq!(second.len(), 4);
    for order in second.content() {
        let id = order.id.clone().expect("id");
        assert!(!first_ids.contains(&id), "replayed page must not overlap");
    }
}

#[test]
fn unpaged_request_scans_to_completion() {
    let (_store, repo) = orders_repository();
    seed(&repo, 200); // larger than one internal scan batch

    let page = repo.find_page(&PageRequest::unpaged(), None).expect("page failed");
    assert_eq!(page.len(), 200);
    assert!(!page.has_more());
    assert_eq!(page.cursor(), &ScanCursor::exhausted());
    assert_eq!(page.total_pages(), 1);
}
