//! HTTP inbound adapter: handlers, session plumbing, and error mapping.

pub mod accounts;
pub mod error;
pub mod flash;
pub mod landmarks;
pub mod pages;
pub mod profile;
pub mod routes;
pub mod session;
pub mod state;
pub mod walks;

pub use error::ApiResult;
pub use session::SessionContext;
pub use state::HttpState;

use actix_web::http::header;
use actix_web::HttpResponse;

/// A `303 See Other` redirect to the given location.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
