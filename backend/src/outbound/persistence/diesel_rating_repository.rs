//! Diesel-backed [`RatingRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{RatingRepository, RepoResult};
use crate::domain::{Landmark, LandmarkId, Rating, Score, Upserted, UserId};

use super::diesel_helpers::{map_diesel_error, run_blocking};
use super::models::{LandmarkRow, NewRatingRow, RatingRow};
use super::pool::DbPool;
use super::schema::{landmarks, ratings};

/// SQLite-backed rating store.
#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn upsert(
        &self,
        user_id: UserId,
        landmark_id: LandmarkId,
        score: Score,
    ) -> RepoResult<Upserted> {
        run_blocking(&self.pool, move |conn| {
            // Insert first; the unique index on (user_id, landmark_id) makes
            // the conflict branch deterministic under concurrent raters.
            let inserted = diesel::insert_into(ratings::table)
                .values(NewRatingRow {
                    user_id: user_id.0,
                    landmark_id: landmark_id.0,
                    score,
                })
                .on_conflict((ratings::user_id, ratings::landmark_id))
                .do_nothing()
                .execute(conn)
                .map_err(map_diesel_error)?;

            if inserted > 0 {
                return Ok(Upserted::Created);
            }

            diesel::update(
                ratings::table
                    .filter(ratings::user_id.eq(user_id.0))
                    .filter(ratings::landmark_id.eq(landmark_id.0)),
            )
            .set(ratings::score.eq(score))
            .execute(conn)
            .map_err(map_diesel_error)?;
            Ok(Upserted::Updated)
        })
        .await
    }

    async fn find_by_user_and_landmark(
        &self,
        user_id: UserId,
        landmark_id: LandmarkId,
    ) -> RepoResult<Option<Rating>> {
        run_blocking(&self.pool, move |conn| {
            ratings::table
                .filter(ratings::user_id.eq(user_id.0))
                .filter(ratings::landmark_id.eq(landmark_id.0))
                .select(RatingRow::as_select())
                .first::<RatingRow>(conn)
                .optional()
                .map(|row| row.map(Rating::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn ratings_with_landmarks_for_user(
        &self,
        user_id: UserId,
    ) -> RepoResult<Vec<(Rating, Landmark)>> {
        run_blocking(&self.pool, move |conn| {
            ratings::table
                .inner_join(landmarks::table)
                .filter(ratings::user_id.eq(user_id.0))
                .select((RatingRow::as_select(), LandmarkRow::as_select()))
                .load::<(RatingRow, LandmarkRow)>(conn)
                .map(|rows| {
                    rows.into_iter()
                        .map(|(rating, landmark)| (Rating::from(rating), Landmark::from(landmark)))
                        .collect()
                })
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{LandmarkRepository, UserRepository};
    use crate::domain::{Email, PasswordHash};
    use crate::outbound::persistence::diesel_landmark_repository::DieselLandmarkRepository;
    use crate::outbound::persistence::diesel_user_repository::DieselUserRepository;
    use crate::outbound::persistence::pool::{run_migrations, DbPool, PoolConfig};

    fn pool() -> DbPool {
        let pool = PoolConfig::in_memory().build().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    async fn seed(pool: &DbPool) -> (UserId, LandmarkId) {
        let users = DieselUserRepository::new(pool.clone());
        let landmarks = DieselLandmarkRepository::new(pool.clone());
        let user = users
            .create(
                &Email::new("ada@example.com").unwrap(),
                &PasswordHash::derive("hunter2").unwrap(),
            )
            .await
            .unwrap();
        let landmark = landmarks.create("Fort Point", None).await.unwrap();
        (user.id, landmark.id)
    }

    #[tokio::test]
    async fn first_rating_is_created_second_updates_in_place() {
        let pool = pool();
        let (user_id, landmark_id) = seed(&pool).await;
        let repo = DieselRatingRepository::new(pool);

        assert_eq!(
            repo.upsert(user_id, landmark_id, 3).await.unwrap(),
            Upserted::Created
        );
        assert_eq!(
            repo.upsert(user_id, landmark_id, 5).await.unwrap(),
            Upserted::Updated
        );

        let rating = repo
            .find_by_user_and_landmark(user_id, landmark_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rating.score, 5);
    }

    #[tokio::test]
    async fn profile_join_pairs_ratings_with_their_landmarks() {
        let pool = pool();
        let (user_id, landmark_id) = seed(&pool).await;
        let repo = DieselRatingRepository::new(pool);

        repo.upsert(user_id, landmark_id, 4).await.unwrap();
        let entries = repo.ratings_with_landmarks_for_user(user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0.score, 4);
        assert_eq!(entries[0].1.name, "Fort Point");
    }

    #[tokio::test]
    async fn missing_rating_is_none() {
        let pool = pool();
        let (user_id, landmark_id) = seed(&pool).await;
        let repo = DieselRatingRepository::new(pool);
        assert!(repo
            .find_by_user_and_landmark(user_id, landmark_id)
            .await
            .unwrap()
            .is_none());
    }
}
