//! Diesel-backed [`LandmarkRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{LandmarkRepository, RepoResult};
use crate::domain::{Landmark, LandmarkId, Rating};

use super::diesel_helpers::{map_diesel_error, run_blocking};
use super::models::{LandmarkRow, NewLandmarkRow, RatingRow};
use super::pool::DbPool;
use super::schema::{landmarks, ratings};

/// SQLite-backed landmark catalogue.
#[derive(Clone)]
pub struct DieselLandmarkRepository {
    pool: DbPool,
}

impl DieselLandmarkRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LandmarkRepository for DieselLandmarkRepository {
    async fn create(&self, name: &str, description: Option<&str>) -> RepoResult<Landmark> {
        let name = name.to_owned();
        let description = description.map(ToOwned::to_owned);
        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(landmarks::table)
                .values(NewLandmarkRow {
                    name: &name,
                    description: description.as_deref(),
                })
                .returning(LandmarkRow::as_returning())
                .get_result::<LandmarkRow>(conn)
                .map(Landmark::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_id(&self, id: LandmarkId) -> RepoResult<Option<Landmark>> {
        run_blocking(&self.pool, move |conn| {
            landmarks::table
                .find(id.0)
                .select(LandmarkRow::as_select())
                .first::<LandmarkRow>(conn)
                .optional()
                .map(|row| row.map(Landmark::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn ratings_for(&self, id: LandmarkId) -> RepoResult<Vec<Rating>> {
        run_blocking(&self.pool, move |conn| {
            ratings::table
                .filter(ratings::landmark_id.eq(id.0))
                .select(RatingRow::as_select())
                .load::<RatingRow>(conn)
                .map(|rows| rows.into_iter().map(Rating::from).collect())
                .map_err(map_diesel_error)
        })
        .await
    }
}
