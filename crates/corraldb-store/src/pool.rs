//! Bounded connection pool with blocking acquisition.
//!
//! The pool is the only shared mutable resource in the store layer and
//! its size ceiling is the layer's backpressure signal: when every
//! connection is checked out, acquisition blocks for up to the
//! configured deadline before failing with
//! [`StoreError::PoolTimeout`].
//!
//! Connections are created lazily up to the ceiling and returned on
//! every exit path - the [`PooledConn`] guard hands its connection back
//! on drop, including panic unwinds.

use std::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::conn::{StoreBackend, StoreConnection};
use crate::error::{StoreError, StoreResult};

/// A bounded pool of store connections.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use corraldb_store::backends::MemoryStore;
/// use corraldb_store::{ConnectionPool, StoreConnection};
///
/// let pool = ConnectionPool::new(MemoryStore::new(), 4, Duration::from_secs(1));
///
/// let mut conn = pool.acquire()?;
/// let next = conn.incr("counter")?;
/// assert_eq!(next, 1);
/// drop(conn); // returned to the pool
/// # Ok::<(), corraldb_store::StoreError>(())
/// ```
pub struct ConnectionPool<B: StoreBackend> {
    backend: B,
    max_size: usize,
    acquire_timeout: Duration,
    inner: Mutex<PoolInner<B::Conn>>,
    available: Condvar,
}

struct PoolInner<C> {
    idle: Vec<C>,
    open: usize,
}

impl<B: StoreBackend> ConnectionPool<B> {
    /// Create a pool over the given backend.
    ///
    /// `max_size` is the connection ceiling; `acquire_timeout` bounds
    /// how long [`Self::acquire`] blocks when the pool is exhausted.
    pub fn new(backend: B, max_size: usize, acquire_timeout: Duration) -> Self {
        Self {
            backend,
            max_size,
            acquire_timeout,
            inner: Mutex::new(PoolInner { idle: Vec::new(), open: 0 }),
            available: Condvar::new(),
        }
    }

    /// Acquire a connection, blocking up to the configured deadline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PoolTimeout`] if no connection became
    /// available in time, or the backend's connection error if a fresh
    /// connection could not be opened.
    pub fn acquire(&self) -> StoreResult<PooledConn<'_, B>> {
        let deadline = Instant::now() + self.acquire_timeout;
        let mut inner = self.inner.lock().map_err(|_| StoreError::LockPoisoned)?;

        loop {
            if let Some(conn) = inner.idle.pop() {
                return Ok(PooledConn { pool: self, conn: Some(conn) });
            }

            if inner.open < self.max_size {
                inner.open += 1;
                drop(inner);
                match self.backend.connect() {
                    Ok(conn) => return Ok(PooledConn { pool: self, conn: Some(conn) }),
                    Err(e) => {
                        // Give the slot back so a waiter can retry.
                        if let Ok(mut inner) = self.inner.lock() {
                            inner.open -= 1;
                            self.available.notify_one();
                        }
                        return Err(e);
                    }
                }
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::debug!(timeout = ?self.acquire_timeout, "connection pool exhausted");
                return Err(StoreError::PoolTimeout(self.acquire_timeout));
            }
            let (guard, _timed_out) = self
                .available
                .wait_timeout(inner, deadline - now)
                .map_err(|_| StoreError::LockPoisoned)?;
            inner = guard;
        }
    }

    /// Number of idle connections currently parked in the pool.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.idle.len())
    }

    /// Number of connections the pool has open (idle plus checked out).
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.open)
    }

    /// The pool size ceiling.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    fn release(&self, mut conn: B::Conn) {
        // Drop any watch state a panicking caller may have left behind.
        let _ = conn.unwatch();
        if let Ok(mut inner) = self.inner.lock() {
            inner.idle.push(conn);
            self.available.notify_one();
        }
        // A poisoned pool lock drops the connection; the pool is
        // unusable at that point anyway.
    }
}

/// A connection checked out of a [`ConnectionPool`].
///
/// Dereferences to the backend connection. The connection is returned
/// to the pool when the guard drops - on success, error, or panic.
pub struct PooledConn<'pool, B: StoreBackend> {
    pool: &'pool ConnectionPool<B>,
    conn: Option<B::Conn>,
}

impl<B: StoreBackend> std::fmt::Debug for PooledConn<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConn")
            .field("checked_out", &self.conn.is_some())
            .finish()
    }
}

impl<B: StoreBackend> Deref for PooledConn<'_, B> {
    type Target = B::Conn;

    fn deref(&self) -> &Self::Target {
        self.conn.as_ref().unwrap_or_else(|| unreachable!("connection taken before drop"))
    }
}

impl<B: StoreBackend> DerefMut for PooledConn<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn.as_mut().unwrap_or_else(|| unreachable!("connection taken before drop"))
    }
}

impl<B: StoreBackend> Drop for PooledConn<'_, B> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.release(conn);
        }
    }
}
