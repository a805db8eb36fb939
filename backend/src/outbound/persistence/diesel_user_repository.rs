//! Diesel-backed [`UserRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{RepoError, RepoResult, UserRepository};
use crate::domain::{Email, PasswordHash, User, UserId};

use super::diesel_helpers::{map_diesel_error, run_blocking};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// SQLite-backed user account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_domain(row: UserRow) -> RepoResult<User> {
    row.into_domain().map_err(RepoError::Query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, email: &Email, password_hash: &PasswordHash) -> RepoResult<User> {
        let email = email.as_ref().to_owned();
        let hash = password_hash.as_ref().to_owned();
        run_blocking(&self.pool, move |conn| {
            // The unique index on email turns concurrent duplicate
            // registrations into a Duplicate error instead of a second row.
            let row = diesel::insert_into(users::table)
                .values(NewUserRow {
                    email: &email,
                    password_hash: &hash,
                })
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(conn)
                .map_err(map_diesel_error)?;
            into_domain(row)
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> RepoResult<Option<User>> {
        let email = email.as_ref().to_owned();
        run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::email.eq(&email))
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(into_domain)
                .transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        run_blocking(&self.pool, move |conn| {
            users::table
                .find(id.0)
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(into_domain)
                .transpose()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::pool::{run_migrations, PoolConfig};

    fn repository() -> DieselUserRepository {
        let pool = PoolConfig::in_memory().build().unwrap();
        run_migrations(&pool).unwrap();
        DieselUserRepository::new(pool)
    }

    fn email(raw: &str) -> Email {
        Email::new(raw).unwrap()
    }

    fn hash() -> PasswordHash {
        PasswordHash::derive("hunter2").unwrap()
    }

    #[tokio::test]
    async fn creates_and_finds_users() {
        let repo = repository();
        let created = repo.create(&email("ada@example.com"), &hash()).await.unwrap();

        let by_email = repo
            .find_by_email(&email("ada@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email.as_ref(), "ada@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_by_the_store() {
        let repo = repository();
        repo.create(&email("ada@example.com"), &hash()).await.unwrap();

        let err = repo
            .create(&email("ada@example.com"), &hash())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn absent_users_come_back_as_none() {
        let repo = repository();
        assert!(repo
            .find_by_email(&email("nobody@example.com"))
            .await
            .unwrap()
            .is_none());
        assert!(repo.find_by_id(UserId(7)).await.unwrap().is_none());
    }
}
