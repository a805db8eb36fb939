//! Static page handlers: homepage and the account forms.
//!
//! Pages render as the mapping of named values the presentation layer
//! receives; HTML templating is an external collaborator.

use actix_web::{get, HttpResponse};
use serde_json::json;

use super::error::ApiResult;
use super::session::SessionContext;

/// Homepage.
#[get("/")]
pub async fn home(session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = session.user_id()?;
    let messages = session.take_flashes()?;
    Ok(HttpResponse::Ok().json(json!({
        "page": "homepage",
        "userId": user_id,
        "messages": messages,
    })))
}

/// Form for users to register an account.
#[get("/registration")]
pub async fn registration_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let messages = session.take_flashes()?;
    Ok(HttpResponse::Ok().json(json!({
        "page": "registration",
        "messages": messages,
    })))
}

/// Form for users to log in.
#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let messages = session.take_flashes()?;
    Ok(HttpResponse::Ok().json(json!({
        "page": "login",
        "messages": messages,
    })))
}
