//! The pooled store client.
//!
//! [`StoreClient`] is the single entry point the repository layer uses
//! to reach the store. It owns the connection pool and exposes four
//! operation shapes:
//!
//! - [`StoreClient::execute`] - one unit of work on one connection
//! - [`StoreClient::pipeline`] - batched dispatch, no atomicity
//! - [`StoreClient::find`] - a read with an explicit not-found result
//! - [`StoreClient::transaction`] - the optimistic watch/multi/exec
//!   envelope
//!
//! Every operation acquires a pooled connection and releases it on all
//! exit paths, including panics - the pool guard handles the unwind.
//!
//! A client built from a disabled [`StoreConfig`] holds no pool and
//! reports [`StoreError::Disabled`] from every operation; layers above
//! turn that into graceful no-op results.

use crate::config::StoreConfig;
use crate::conn::{StoreBackend, StoreConnection};
use crate::error::{StoreError, StoreResult};
use crate::pool::ConnectionPool;

/// A pooled client over one store backend.
///
/// # Example
///
/// ```
/// use corraldb_store::backends::MemoryStore;
/// use corraldb_store::{StoreClient, StoreConfig, StoreConnection};
///
/// let client = StoreClient::connect(MemoryStore::new(), &StoreConfig::default())?;
///
/// let next = client.execute(|conn| conn.incr("orders:nextId"))?;
/// assert_eq!(next, 1);
/// # Ok::<(), corraldb_store::StoreError>(())
/// ```
pub struct StoreClient<B: StoreBackend> {
    pool: Option<ConnectionPool<B>>,
}

impl<B: StoreBackend> StoreClient<B> {
    /// Build a client over the given backend.
    ///
    /// Connections are opened lazily, up to `config.connect_count`,
    /// with `config.timeout` bounding pool acquisition. A config with
    /// `enabled: false` yields a disabled client that performs no I/O.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature leaves room for backends
    /// that validate configuration eagerly.
    pub fn connect(backend: B, config: &StoreConfig) -> StoreResult<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        let pool = ConnectionPool::new(backend, config.connect_count, config.timeout);
        Ok(Self { pool: Some(pool) })
    }

    /// A client with the layer gated off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { pool: None }
    }

    /// Returns `true` unless this client was built disabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    fn pool(&self) -> StoreResult<&ConnectionPool<B>> {
        self.pool.as_ref().ok_or(StoreError::Disabled)
    }

    /// Run one unit of work against one pooled connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disabled`] on a disabled client, pool or
    /// connection errors, or the body's error.
    pub fn execute<R>(
        &self,
        f: impl FnOnce(&mut B::Conn) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut conn = self.pool()?.acquire()?;
        f(&mut conn)
    }

    /// Run a read returning an explicit not-found result.
    ///
    /// `Ok(None)` means the requested data does not exist; it is never
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disabled`] on a disabled client, pool or
    /// connection errors, or the body's error.
    pub fn find<R>(
        &self,
        f: impl FnOnce(&mut B::Conn) -> StoreResult<Option<R>>,
    ) -> StoreResult<Option<R>> {
        let mut conn = self.pool()?.acquire()?;
        f(&mut conn)
    }

    /// Batch commands for one round trip without cross-command
    /// atomicity.
    ///
    /// The batch is flushed before this returns. A mid-batch failure
    /// can leave earlier commands applied - callers needing
    /// all-or-nothing use [`Self::transaction`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disabled`] on a disabled client, pool or
    /// connection errors, or the body's error.
    pub fn pipeline<R, F>(&self, f: F) -> StoreResult<R>
    where
        F: for<'a> FnOnce(&mut <B::Conn as StoreConnection>::Pipe<'a>) -> StoreResult<R>,
    {
        let mut conn = self.pool()?.acquire()?;
        conn.pipeline(f)
    }

    /// Run an optimistic transaction guarded by watches on
    /// `watch_keys`.
    ///
    /// The body queues writes against the transaction handle; they
    /// commit atomically unless a watched key was written between the
    /// watch and the commit, in which case nothing is written and this
    /// returns `Ok(None)`. Callers must treat `Ok(None)` as a
    /// conflict - someone else won the race - never as a normal empty
    /// result; the write may be retried from the top.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disabled`] on a disabled client, pool or
    /// connection errors, or the body's error (in which case nothing
    /// was written and the watches were dropped).
    pub fn transaction<R, F>(&self, watch_keys: &[String], f: F) -> StoreResult<Option<R>>
    where
        F: for<'a> FnOnce(&mut <B::Conn as StoreConnection>::Tx<'a>) -> StoreResult<R>,
    {
        let mut conn = self.pool()?.acquire()?;
        conn.watch(watch_keys)?;
        let result = conn.transaction(f)?;
        if result.is_none() {
            tracing::debug!(keys = ?watch_keys, "optimistic commit refused");
        }
        Ok(result)
    }
}
