//! Disabled-gate integration tests.
//!
//! With `enabled: false` the layer performs no I/O: reads degrade to
//! empty results, writes report the explicit disabled error for
//! callers to branch on.

use corraldb::{EntityId, PageRequest};

use crate::common::{disabled_repository, Order};

#[test]
fn reads_degrade_to_empty_results() {
    let repo = disabled_repository();

    assert!(repo.find_by_id(&EntityId::new("1")).expect("find failed").is_none());
    assert!(!repo.exists(&EntityId::new("1")).expect("exists failed"));
    assert_eq!(repo.count().expect("count failed"), 0);
    assert!(repo.find_all(None).expect("find_all failed").is_empty());

    let page = repo.find_page(&PageRequest::of(20), None).expect("page failed");
    assert!(page.is_empty());
    assert!(!page.has_more());
    assert_eq!(page.total_elements(), 0);
}

#[test]
fn writes_report_the_disabled_gate() {
    let repo = disabled_repository();

    let err = repo.save(Order::new("widget", 1)).expect_err("save should be gated");
    assert!(err.is_disabled());
    assert!(!err.is_retryable());

    let err = repo.delete(&EntityId::new("1")).expect_err("delete should be gated");
    assert!(err.is_disabled());

    let err = repo
        .delete_all(&[Order::new("widget", 1)])
        .expect_err("delete_all should be gated");
    assert!(err.is_disabled());
}
