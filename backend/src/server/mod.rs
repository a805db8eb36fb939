//! Server wiring: configuration and middleware construction.

pub mod config;

pub use config::{AppConfig, ConfigError};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};

/// Build the cookie-session middleware.
///
/// One signed cookie holds the whole session (identity plus pending flash
/// messages); `SameSite=Lax` keeps the form-post flows working while
/// blocking cross-site requests.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}
