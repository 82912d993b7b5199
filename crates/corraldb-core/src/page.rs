//! Pagination vocabulary: requests, results, and continuation cursors.
//!
//! Pagination is cursor-based. A page request carries a size and an
//! opaque [`ScanCursor`]; a page result carries the batch content, the
//! continuation cursor, a "has more" flag, and the index cardinality at
//! the time of the scan. Replaying a page's continuation cursor resumes
//! exactly where that page's scan left off, independent of later
//! deletions outside the already-returned range.

use serde::{Deserialize, Serialize};

/// An opaque token marking a resumable position within an index scan.
///
/// Cursors are produced by the store and replayed verbatim. Resuming a
/// cursor after the index has shrunk below its logical position is
/// safe: the scan terminates as exhausted rather than erroring.
///
/// Cursors are scoped to the index generation that produced them: a
/// token taken before a keyspace index was cleared and rebuilt does not
/// name a meaningful position afterwards, and replaying one simply
/// terminates the scan. Callers must not persist cursors across index
/// rebuilds.
///
/// # Example
///
/// ```
/// use corraldb_core::ScanCursor;
///
/// let cursor = ScanCursor::start();
/// assert!(cursor.is_start());
/// assert!(!cursor.is_exhausted());
///
/// let resumed = ScanCursor::after("41");
/// assert_eq!(resumed.position(), Some("41"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanCursor {
    /// The scan has not begun; start at the first member.
    Start,
    /// Resume strictly after this member, in scan order.
    After(String),
    /// The scan has visited every member; nothing remains.
    Exhausted,
}

impl ScanCursor {
    /// The start-of-index cursor.
    #[inline]
    #[must_use]
    pub const fn start() -> Self {
        Self::Start
    }

    /// A cursor resuming strictly after the given member.
    #[inline]
    #[must_use]
    pub fn after(member: impl Into<String>) -> Self {
        Self::After(member.into())
    }

    /// The terminal cursor of a completed scan.
    #[inline]
    #[must_use]
    pub const fn exhausted() -> Self {
        Self::Exhausted
    }

    /// Returns `true` for the start-of-index cursor.
    #[inline]
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self, Self::Start)
    }

    /// Returns `true` once the scan has run out of members.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The member this cursor resumes after, if it names one.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        match self {
            Self::After(member) => Some(member),
            Self::Start | Self::Exhausted => None,
        }
    }
}

impl Default for ScanCursor {
    fn default() -> Self {
        Self::Start
    }
}

/// A request for one page of a keyspace.
///
/// A sized request fetches up to `size` entities in one index scan
/// batch. An unpaged request scans the index to completion and returns
/// everything - explicitly slower, a caller opt-in rather than a
/// default.
///
/// # Example
///
/// ```
/// use corraldb_core::{PageRequest, ScanCursor};
///
/// let first = PageRequest::of(20);
/// assert_eq!(first.size(), Some(20));
/// assert!(first.cursor().is_start());
///
/// let next = PageRequest::with_cursor(ScanCursor::after("20"), 20);
/// assert_eq!(next.cursor().position(), Some("20"));
///
/// let everything = PageRequest::unpaged();
/// assert!(everything.is_unpaged());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    size: Option<usize>,
    cursor: ScanCursor,
}

impl PageRequest {
    /// A request for the first page of the given size.
    #[inline]
    #[must_use]
    pub const fn of(size: usize) -> Self {
        Self { size: Some(size), cursor: ScanCursor::start() }
    }

    /// A request resuming from a previous page's continuation cursor.
    #[inline]
    #[must_use]
    pub const fn with_cursor(cursor: ScanCursor, size: usize) -> Self {
        Self { size: Some(size), cursor }
    }

    /// A request for the entire keyspace in one result.
    #[inline]
    #[must_use]
    pub const fn unpaged() -> Self {
        Self { size: None, cursor: ScanCursor::start() }
    }

    /// The page size, or `None` for an unpaged request.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Option<usize> {
        self.size
    }

    /// The cursor this request resumes from.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &ScanCursor {
        &self.cursor
    }

    /// Returns `true` for a scan-to-completion request.
    #[inline]
    #[must_use]
    pub const fn is_unpaged(&self) -> bool {
        self.size.is_none()
    }
}

/// One page of entities plus the state needed to fetch the next.
///
/// The element count comes from the index cardinality at scan time, not
/// from scanning the full index. An empty page with `has_more == false`
/// is the terminal, successful case of a scan - never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    content: Vec<T>,
    cursor: ScanCursor,
    has_more: bool,
    total_elements: u64,
    page_size: Option<usize>,
}

impl<T> Page<T> {
    /// Assemble a page from a scan batch.
    #[must_use]
    pub const fn new(
        content: Vec<T>,
        cursor: ScanCursor,
        has_more: bool,
        total_elements: u64,
        page_size: Option<usize>,
    ) -> Self {
        Self { content, cursor, has_more, total_elements, page_size }
    }

    /// The entities in this page.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, yielding its entities.
    #[inline]
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// The continuation cursor to pass to the next page request.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &ScanCursor {
        &self.cursor
    }

    /// Whether another page may follow this one.
    #[inline]
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// The index cardinality observed when this page was fetched.
    #[inline]
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// The total page count derived from cardinality and page size.
    ///
    /// An unpaged result is one page (or zero when empty).
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        match self.page_size {
            Some(size) if size > 0 => self.total_elements.div_ceil(size as u64),
            _ => u64::from(self.total_elements > 0),
        }
    }

    /// Number of entities in this page.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if this page holds no entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
