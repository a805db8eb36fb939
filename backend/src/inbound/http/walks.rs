//! Walk creation handler.
//!
//! ```text
//! GET /walks/new?origin=...&destination=...&time=...
//! ```
//!
//! Mapping the route onto landmarks is delegated to the [`RouteMapper`]
//! port; without a configured directions service the request yields a
//! structured `503` instead of a half-built feature.
//!
//! [`RouteMapper`]: crate::domain::ports::RouteMapper

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{Error, WalkRequest};

use super::error::ApiResult;
use super::see_other;
use super::session::SessionContext;
use super::state::HttpState;

/// Query parameters for `GET /walks/new`.
#[derive(Debug, Deserialize)]
pub struct WalkQuery {
    pub origin: String,
    pub destination: String,
    pub time: String,
}

impl WalkQuery {
    fn into_request(self) -> Result<WalkRequest, Error> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(Error::invalid_request(
                "origin and destination must not be empty",
            ));
        }
        Ok(WalkRequest {
            origin: self.origin,
            destination: self.destination,
            time_budget: self.time,
        })
    }
}

/// Create and map a new walk from the user's origin, destination, and time
/// constraint, then persist it with the landmarks the route passes through.
#[get("/walks/new")]
pub async fn create_walk(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<WalkQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let request = query.into_inner().into_request()?;

    let plan = state.route_mapper.plan(&request).await?;
    let walk = state
        .walks
        .create(user_id, &request, &plan.landmarks)
        .await?;

    tracing::info!(%user_id, walk_id = ?walk.id, stops = plan.landmarks.len(), "walk mapped");
    session.flash("Your walk has been mapped.")?;
    Ok(see_other("/profile"))
}
