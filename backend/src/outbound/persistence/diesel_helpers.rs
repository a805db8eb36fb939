//! Shared plumbing for the Diesel repository adapters.
//!
//! Maps Diesel and pool failures onto [`RepoError`] and hosts the bridge
//! that moves blocking SQLite work off the async request path.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

use crate::domain::ports::{RepoError, RepoResult};

use super::pool::{checkout, DbPool, PoolError};

/// Translate a Diesel error into the repository error taxonomy.
///
/// Unique-constraint violations become [`RepoError::Duplicate`] so callers
/// can treat them as the "already exists" case.
pub(crate) fn map_diesel_error(err: DieselError) -> RepoError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepoError::Duplicate(info.message().to_owned())
        }
        other => RepoError::Query(other.to_string()),
    }
}

pub(crate) fn map_pool_error(err: PoolError) -> RepoError {
    RepoError::Connection(err.to_string())
}

/// Run a Diesel closure on the blocking thread pool with a pooled connection.
///
/// SQLite has no async driver, so every query goes through here to keep the
/// Actix workers responsive.
pub(crate) async fn run_blocking<T, F>(pool: &DbPool, f: F) -> RepoResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> RepoResult<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = checkout(&pool).map_err(map_pool_error)?;
        f(&mut conn)
    })
    .await
    .map_err(|err| RepoError::Connection(format!("blocking task failed: {err}")))?
}
