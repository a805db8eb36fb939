//! The application's route table.
//!
//! Registered through `ServiceConfig` so the real server and the test
//! harness mount exactly the same surface.

use actix_web::web::{FormConfig, PathConfig, QueryConfig, ServiceConfig};

use crate::domain::Error;

use super::{accounts, landmarks, pages, profile, walks};

/// Register every handler on the given service config.
///
/// Extractor failures (unparseable forms, queries, and path segments)
/// surface as `invalid_request` responses rather than the default
/// plain-text rejection.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string()).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string()).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string()).into()
    }))
    .service(pages::home)
        .service(pages::registration_form)
        .service(pages::login_form)
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(profile::profile)
        .service(landmarks::landmark_detail)
        .service(landmarks::rate_landmark)
        .service(walks::create_walk);
}
