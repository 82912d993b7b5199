//! Configuration for the store client.

use std::time::Duration;

/// Recognized options for the store client.
///
/// `enabled` gates the whole layer: a client built from a disabled
/// config performs no I/O and reports
/// [`StoreError::Disabled`](crate::StoreError::Disabled) from every
/// command, which the repository layer maps to graceful no-op results.
///
/// `timeout` bounds both pooled-connection acquisition and the
/// per-command deadline of backends that honor one. `connect_count` is
/// the pool-size ceiling and therefore the layer's backpressure knob.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use corraldb_store::StoreConfig;
///
/// let config = StoreConfig::new()
///     .host("store.internal")
///     .port(6380)
///     .timeout(Duration::from_millis(500))
///     .connect_count(4);
///
/// assert!(config.enabled);
/// assert_eq!(config.connect_count, 4);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Gate for the whole layer. Default: true.
    pub enabled: bool,

    /// Store host. Default: "127.0.0.1". Ignored by the memory backend.
    pub host: String,

    /// Store port. Default: 6379. Ignored by the memory backend.
    pub port: u16,

    /// Connection-acquisition and per-command deadline.
    /// Default: 2 seconds.
    pub timeout: Duration,

    /// Optional authentication secret. Ignored by the memory backend.
    pub password: Option<String>,

    /// Logical store index. Default: 0. Ignored by the memory backend.
    pub database: u32,

    /// Pool size ceiling. Default: 8.
    pub connect_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_owned(),
            port: 6379,
            timeout: Duration::from_secs(2),
            password: None,
            database: 0,
            connect_count: 8,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with the layer gated off.
    #[must_use]
    pub fn disabled() -> Self {
        Self { enabled: false, ..Default::default() }
    }

    /// Set the store host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the store port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the acquisition/command deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication secret.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the logical store index.
    #[must_use]
    pub const fn database(mut self, database: u32) -> Self {
        self.database = database;
        self
    }

    /// Set the pool size ceiling.
    #[must_use]
    pub const fn connect_count(mut self, count: usize) -> Self {
        self.connect_count = count;
        self
    }
}
