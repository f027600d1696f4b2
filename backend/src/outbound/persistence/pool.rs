//! Async-safe connection pool for Diesel SQLite connections.
//!
//! The store is a single SQLite file. Connections are wrapped in
//! `diesel-async`'s `SyncConnectionWrapper`, which runs each statement on a
//! blocking thread, and pooled through `bb8` so handlers never block the
//! runtime.
//!
//! # Design
//!
//! - The pool holds one connection by default. SQLite admits a single writer,
//!   and one pooled connection serializes every statement the process issues.
//! - Pool checkout respects the configured timeout.
//! - All errors are mapped to `PoolError` variants.

use std::time::Duration;

use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use tracing::info;

/// Async view of a blocking SQLite connection.
pub type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use evaluations::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("evaluations.db")
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_path(), "evaluations.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the SQLite file at `database_path`.
    ///
    /// The file is created on first connection when missing.
    ///
    /// Defaults:
    /// - `max_size`: 1 connection
    /// - `connection_timeout`: 30 seconds
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 1,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Path of the SQLite file.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }
}

/// Async connection pool over one SQLite file.
///
/// # Example
///
/// ```ignore
/// let pool = DbPool::new(PoolConfig::new("evaluations.db")).await?;
/// let mut conn = pool.get().await?;
/// // Use conn for Diesel operations...
/// ```
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncSqliteConnection>,
    database_path: String,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// No connection is opened until the first checkout.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_path,
            max_size,
            connection_timeout,
        } = config;
        let manager =
            AsyncDieselConnectionManager::<AsyncSqliteConnection>::new(database_path.as_str());

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self {
            inner: pool,
            database_path,
        })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be opened or
    /// obtained within the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncSqliteConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Path of the SQLite file backing this pool.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    /// Release this handle on the pool.
    ///
    /// Pooled connections, and with them the SQLite file handle, close once
    /// the last clone of the pool is dropped.
    pub fn close(self) {
        let state = self.inner.state();
        info!(
            path = %self.database_path,
            connections = state.connections,
            "closing database pool"
        );
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("evaluations.db");

        assert_eq!(config.database_path(), "evaluations.db");
        assert_eq!(config.max_size, 1);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("evaluations.db")
            .with_max_size(4)
            .with_connection_timeout(Duration::from_secs(5));

        assert_eq!(config.max_size, 4);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn pool_error_display() {
        let checkout_err = PoolError::checkout("unable to open database file");
        let build_err = PoolError::build("invalid pool size");

        assert!(checkout_err.to_string().contains("unable to open database file"));
        assert!(build_err.to_string().contains("invalid pool size"));
    }

    #[rstest]
    #[tokio::test]
    async fn checkout_fails_for_unreachable_path() {
        let config = PoolConfig::new("/nonexistent-dir/nested/evaluations.db")
            .with_connection_timeout(Duration::from_millis(500));
        let pool = DbPool::new(config).await.expect("pool builds lazily");

        let error = pool.get().await.err().expect("checkout fails");
        assert!(matches!(error, PoolError::Checkout { .. }));
    }
}
