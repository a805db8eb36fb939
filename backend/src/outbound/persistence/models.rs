//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain; each repository converts them at its edge.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{Landmark, LandmarkId, PasswordHash, Rating, User, UserId, Walk, WalkId};

use super::schema::{landmarks, ratings, users, walk_landmarks, walks};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: NaiveDateTime,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let email = crate::domain::Email::new(&self.email)
            .map_err(|err| format!("stored email for user {} is invalid: {err}", self.id))?;
        Ok(User {
            id: UserId(self.id),
            email,
            password_hash: PasswordHash::from_stored(self.password_hash),
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the landmarks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = landmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct LandmarkRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<LandmarkRow> for Landmark {
    fn from(row: LandmarkRow) -> Self {
        Self {
            id: LandmarkId(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

/// Insertable struct for adding landmarks to the catalogue.
#[derive(Debug, Insertable)]
#[diesel(table_name = landmarks)]
pub(crate) struct NewLandmarkRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Row struct for reading from the ratings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RatingRow {
    pub id: i32,
    pub user_id: i32,
    pub landmark_id: i32,
    pub score: i32,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId(row.user_id),
            landmark_id: LandmarkId(row.landmark_id),
            score: row.score,
        }
    }
}

/// Insertable struct for first-time ratings.
#[derive(Debug, Insertable)]
#[diesel(table_name = ratings)]
pub(crate) struct NewRatingRow {
    pub user_id: i32,
    pub landmark_id: i32,
    pub score: i32,
}

/// Row struct for reading from the walks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = walks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct WalkRow {
    pub id: i32,
    pub user_id: i32,
    pub origin: String,
    pub destination: String,
    pub time_budget: String,
}

impl From<WalkRow> for Walk {
    fn from(row: WalkRow) -> Self {
        Self {
            id: WalkId(row.id),
            user_id: UserId(row.user_id),
            origin: row.origin,
            destination: row.destination,
            time_budget: row.time_budget,
        }
    }
}

/// Insertable struct for creating walks.
#[derive(Debug, Insertable)]
#[diesel(table_name = walks)]
pub(crate) struct NewWalkRow<'a> {
    pub user_id: i32,
    pub origin: &'a str,
    pub destination: &'a str,
    pub time_budget: &'a str,
}

/// Insertable struct for walk/landmark links.
#[derive(Debug, Insertable)]
#[diesel(table_name = walk_landmarks)]
pub(crate) struct NewWalkLandmarkRow {
    pub walk_id: i32,
    pub landmark_id: i32,
}
