//! Profile page: the user's walks, rated landmarks, and scores.

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use super::error::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Page showing the viewer's ratings and walks.
///
/// Anonymous viewers get a defined unauthenticated page rather than an
/// error; the same applies when the session references an account that no
/// longer resolves.
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let messages = session.take_flashes()?;

    let Some(user_id) = session.user_id()? else {
        return Ok(unauthenticated(messages));
    };
    let Some(user) = state.users.find_by_id(user_id).await? else {
        tracing::warn!(%user_id, "session references an unknown user");
        session.clear_user();
        return Ok(unauthenticated(messages));
    };

    let ratings = state.ratings.ratings_with_landmarks_for_user(user.id).await?;
    let walks = state.walks.walks_for_user(user.id).await?;

    let rated: Vec<_> = ratings
        .iter()
        .map(|(rating, landmark)| {
            json!({
                "landmarkId": landmark.id,
                "landmark": landmark.name,
                "score": rating.score,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "page": "profile",
        "authenticated": true,
        "user": { "id": user.id, "email": user.email },
        "ratings": rated,
        "walks": walks,
        "messages": messages,
    })))
}

fn unauthenticated(messages: Vec<String>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "page": "profile",
        "authenticated": false,
        "messages": messages,
    }))
}
