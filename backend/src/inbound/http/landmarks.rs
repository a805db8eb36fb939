//! Landmark detail and rating handlers.
//!
//! ```text
//! GET  /landmarks/{landmark_id}
//! POST /rate_landmark  score=...&landmark_id=...
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{average_score, Error, LandmarkId, Score, Upserted};

use super::error::ApiResult;
use super::see_other;
use super::session::SessionContext;
use super::state::HttpState;

/// Details of one landmark: its own ratings, the viewer's rating when
/// logged in, and the average scoped to this landmark alone. A landmark
/// with no ratings has no average.
#[get("/landmarks/{landmark_id}")]
pub async fn landmark_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let landmark_id = LandmarkId(path.into_inner());
    let landmark = state
        .landmarks
        .find_by_id(landmark_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("no landmark with id {landmark_id}")))?;

    let ratings = state.landmarks.ratings_for(landmark_id).await?;
    let scores: Vec<Score> = ratings.iter().map(|rating| rating.score).collect();
    let average = average_score(&scores);

    let user_rating = match session.user_id()? {
        Some(user_id) => {
            state
                .ratings
                .find_by_user_and_landmark(user_id, landmark_id)
                .await?
        }
        None => None,
    };

    let messages = session.take_flashes()?;
    Ok(HttpResponse::Ok().json(json!({
        "page": "landmark_details",
        "landmark": landmark,
        "ratings": ratings,
        "userRating": user_rating,
        "average": average,
        "messages": messages,
    })))
}

/// Form body for `POST /rate_landmark`.
#[derive(Debug, Deserialize)]
pub struct RateForm {
    pub score: Score,
    pub landmark_id: i32,
}

/// Record or overwrite the viewer's rating for a landmark.
///
/// Requires a logged-in session; the store's unique index guarantees one
/// rating per `(user, landmark)` pair no matter how requests interleave.
#[post("/rate_landmark")]
pub async fn rate_landmark(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RateForm>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let landmark_id = LandmarkId(form.landmark_id);

    state
        .landmarks
        .find_by_id(landmark_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("no landmark with id {landmark_id}")))?;

    match state.ratings.upsert(user_id, landmark_id, form.score).await? {
        Upserted::Created => session.flash("Rating saved.")?,
        Upserted::Updated => session.flash("Your rating has been updated.")?,
    }
    tracing::info!(%user_id, %landmark_id, score = form.score, "rating recorded");
    Ok(see_other("/"))
}
