//! Database connection pool for the content store.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Pool size snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PoolSize {
    /// Open connections.
    pub connections: u32,
    /// Idle connections.
    pub idle: u32,
}

/// Pool-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DbPoolError {
    #[error("Failed to connect to {url}: {reason}")]
    ConnectFailed { url: String, reason: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// SQLite connection pool wrapper.
///
/// In-memory databases are per connection, so `sqlite::memory:` pools are
/// pinned to a single connection that never expires.
#[derive(Clone)]
pub struct ContentPool {
    inner: sqlx::SqlitePool,
}

impl ContentPool {
    /// Create a new pool from a connection string.
    pub async fn connect(url: &str) -> Result<Self, DbPoolError> {
        let options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        Self::with_options(url, options).await
    }

    /// Like [`connect`](Self::connect), but creates the database file when it
    /// does not exist yet.
    pub async fn create(url: &str) -> Result<Self, DbPoolError> {
        let connect_failed = |e: sqlx::Error| DbPoolError::ConnectFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let options = SqliteConnectOptions::from_str(url)
            .map_err(connect_failed)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(connect_failed)?;
        tracing::debug!(url, "Opened content pool, creating the database if missing");
        Ok(Self { inner: pool })
    }

    /// Create a pool with custom options.
    pub async fn with_options(url: &str, options: SqlitePoolOptions) -> Result<Self, DbPoolError> {
        let pool = options
            .connect(url)
            .await
            .map_err(|e| DbPoolError::ConnectFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(url, "Connected content pool");
        Ok(Self { inner: pool })
    }

    /// Get the underlying `sqlx::SqlitePool`.
    pub fn inner(&self) -> &sqlx::SqlitePool {
        &self.inner
    }

    /// Check that the database answers queries.
    pub async fn ping(&self) -> Result<(), DbPoolError> {
        sqlx::query("SELECT 1")
            .fetch_one(self.inner())
            .await
            .map_err(|e| DbPoolError::Backend(e.to_string()))?;
        Ok(())
    }

    pub fn size(&self) -> PoolSize {
        PoolSize {
            connections: self.inner.size(),
            idle: self.inner.num_idle() as u32,
        }
    }

    /// Close the pool gracefully.
    pub async fn close(&self) {
        self.inner.close().await;
    }
}
