//! The pagination engine.
//!
//! A page fetch is one index scan batch followed by one hash fetch per
//! returned id - a fan-out, not a single round trip; that is the cost
//! model callers must know. An unpaged request instead scans the index
//! to completion, which is explicitly slower and a caller opt-in.
//!
//! A dangling index member whose hash record is missing (a concurrent
//! delete between index scan and hash fetch, or a torn `delete_all`)
//! is treated as not found and silently skipped - readers reconcile
//! lazily, they never surface it as a failure.
//!
//! This module works in raw field maps; decoding belongs to the facade.

use corraldb_core::{keys, EntityId, FieldMap, Keyspace, PageRequest, ScanCursor};
use corraldb_store::{StoreConnection, StoreResult};

use super::index::KeyspaceIndex;

/// Batch size used when scanning an index to completion.
const FULL_SCAN_BATCH: usize = 128;

/// One page of hash records before decoding.
pub(crate) struct RawPage {
    pub(crate) records: Vec<FieldMap>,
    pub(crate) cursor: ScanCursor,
    pub(crate) has_more: bool,
    pub(crate) total: u64,
    pub(crate) size: Option<usize>,
}

/// Fetch one page of records per the request's size and cursor.
pub(crate) fn fetch_raw_page<Conn: StoreConnection>(
    conn: &mut Conn,
    index: &KeyspaceIndex,
    keyspace: &Keyspace,
    request: &PageRequest,
    filter: Option<&str>,
) -> StoreResult<RawPage> {
    let total = index.cardinality(conn)?;

    let Some(size) = request.size() else {
        let records = scan_all_raw(conn, index, keyspace, filter)?;
        return Ok(RawPage {
            records,
            cursor: ScanCursor::exhausted(),
            has_more: false,
            total,
            size: None,
        });
    };

    if request.cursor().is_exhausted() || size == 0 {
        // The terminal, successful case of a scan - never an error.
        return Ok(RawPage {
            records: Vec::new(),
            cursor: ScanCursor::exhausted(),
            has_more: false,
            total,
            size: Some(size),
        });
    }

    let batch = index.scan(conn, request.cursor(), filter, size)?;
    let records = resolve(conn, keyspace, &batch.members)?;
    let has_more = !batch.cursor.is_exhausted();
    Ok(RawPage { records, cursor: batch.cursor, has_more, total, size: Some(size) })
}

/// Scan the index to completion and resolve every member.
pub(crate) fn scan_all_raw<Conn: StoreConnection>(
    conn: &mut Conn,
    index: &KeyspaceIndex,
    keyspace: &Keyspace,
    filter: Option<&str>,
) -> StoreResult<Vec<FieldMap>> {
    let mut records = Vec::new();
    let mut cursor = ScanCursor::start();
    loop {
        let batch = index.scan(conn, &cursor, filter, FULL_SCAN_BATCH)?;
        records.extend(resolve(conn, keyspace, &batch.members)?);
        if batch.cursor.is_exhausted() {
            return Ok(records);
        }
        cursor = batch.cursor;
    }
}

/// Resolve scanned member ids to hash records, one fetch per id.
fn resolve<Conn: StoreConnection>(
    conn: &mut Conn,
    keyspace: &Keyspace,
    members: &[String],
) -> StoreResult<Vec<FieldMap>> {
    let mut records = Vec::with_capacity(members.len());
    for member in members {
        let id = EntityId::new(member.as_str());
        let fields = conn.hgetall(&keys::entity_key(keyspace, &id))?;
        if fields.is_empty() {
            // Dangling index member: removed between scan and fetch.
            continue;
        }
        records.push(fields);
    }
    Ok(records)
}
