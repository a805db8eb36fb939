//! Connection pool for Diesel SQLite connections.
//!
//! Wraps Diesel's bundled `r2d2` integration. Every pooled connection gets
//! `PRAGMA foreign_keys = ON` (SQLite leaves referential integrity off by
//! default) and a busy timeout so concurrent writers queue instead of
//! erroring immediately.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pool of SQLite connections shared by the repository adapters.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of [`DbPool`].
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Errors that can occur while setting up or using the pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },

    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to apply pending schema migrations.
    #[error("failed to run migrations: {message}")]
    Migration { message: String },
}

impl PoolError {
    fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configure a pool for the given SQLite database path or URI.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Configure a single-connection in-memory database.
    ///
    /// Every `:memory:` connection is its own database, so the pool is
    /// capped at one connection to keep reads and writes on the same store.
    /// Intended for tests and local experiments.
    pub fn in_memory() -> Self {
        Self::new(":memory:").with_max_size(1)
    }

    /// Cap the number of pooled connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Override how long a checkout waits before failing.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Build the pool.
    pub fn build(&self) -> Result<DbPool, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(&self.database_url);
        Pool::builder()
            .max_size(self.max_size)
            .connection_timeout(self.connection_timeout)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))
    }
}

/// Check out a connection, mapping checkout failures to [`PoolError`].
pub fn checkout(pool: &DbPool) -> Result<DbConn, PoolError> {
    pool.get().map_err(|err| PoolError::checkout(err.to_string()))
}

/// Apply any pending schema migrations.
pub fn run_migrations(pool: &DbPool) -> Result<(), PoolError> {
    let mut conn = checkout(pool)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| PoolError::migration(err.to_string()))
}
