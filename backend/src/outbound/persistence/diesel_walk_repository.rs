//! Diesel-backed [`WalkRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{RepoResult, WalkRepository};
use crate::domain::{LandmarkId, UserId, Walk, WalkRequest};

use super::diesel_helpers::{map_diesel_error, run_blocking};
use super::models::{NewWalkLandmarkRow, NewWalkRow, WalkRow};
use super::pool::DbPool;
use super::schema::{walk_landmarks, walks};

/// SQLite-backed walk store.
#[derive(Clone)]
pub struct DieselWalkRepository {
    pool: DbPool,
}

impl DieselWalkRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalkRepository for DieselWalkRepository {
    async fn create(
        &self,
        user_id: UserId,
        request: &WalkRequest,
        landmarks: &[LandmarkId],
    ) -> RepoResult<Walk> {
        let request = request.clone();
        let landmarks = landmarks.to_vec();
        run_blocking(&self.pool, move |conn| {
            // The walk and its landmark links land together or not at all.
            conn.transaction(|conn| {
                let row = diesel::insert_into(walks::table)
                    .values(NewWalkRow {
                        user_id: user_id.0,
                        origin: &request.origin,
                        destination: &request.destination,
                        time_budget: &request.time_budget,
                    })
                    .returning(WalkRow::as_returning())
                    .get_result::<WalkRow>(conn)?;

                let links: Vec<NewWalkLandmarkRow> = landmarks
                    .iter()
                    .map(|landmark_id| NewWalkLandmarkRow {
                        walk_id: row.id,
                        landmark_id: landmark_id.0,
                    })
                    .collect();
                diesel::insert_into(walk_landmarks::table)
                    .values(&links)
                    .execute(conn)?;

                Ok(Walk::from(row))
            })
            .map_err(map_diesel_error)
        })
        .await
    }

    async fn walks_for_user(&self, user_id: UserId) -> RepoResult<Vec<Walk>> {
        run_blocking(&self.pool, move |conn| {
            walks::table
                .filter(walks::user_id.eq(user_id.0))
                .select(WalkRow::as_select())
                .load::<WalkRow>(conn)
                .map(|rows| rows.into_iter().map(Walk::from).collect())
                .map_err(map_diesel_error)
        })
        .await
    }
}
