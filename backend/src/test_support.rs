//! Helpers shared by unit and integration tests.
//!
//! Compiled for in-crate `#[cfg(test)]` modules and, behind the
//! `test-support` feature, for the integration suite under `tests/`.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use async_trait::async_trait;

use crate::domain::ports::RouteMapper;
use crate::domain::{Error, LandmarkId, RoutePlan, WalkRequest};
use crate::inbound::http::HttpState;
use crate::outbound::persistence::{run_migrations, DbPool, PoolConfig};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// A migrated single-connection in-memory database.
///
/// # Panics
/// Panics when the pool cannot be built or migrated; tests have no useful
/// recovery from either.
pub fn migrated_memory_pool() -> DbPool {
    let pool = PoolConfig::in_memory()
        .build()
        .expect("build in-memory pool");
    run_migrations(&pool).expect("run migrations");
    pool
}

/// Diesel-backed handler state over a fresh in-memory database.
pub fn memory_state() -> (HttpState, DbPool) {
    let pool = migrated_memory_pool();
    (HttpState::diesel(&pool), pool)
}

/// Route mapper returning a fixed plan, standing in for a directions
/// service.
#[derive(Debug, Clone, Default)]
pub struct StubRouteMapper {
    pub landmarks: Vec<LandmarkId>,
}

#[async_trait]
impl RouteMapper for StubRouteMapper {
    async fn plan(&self, _request: &WalkRequest) -> Result<RoutePlan, Error> {
        Ok(RoutePlan {
            landmarks: self.landmarks.clone(),
        })
    }
}

impl StubRouteMapper {
    /// Wrap in the `Arc<dyn RouteMapper>` shape `HttpState` expects.
    pub fn into_port(self) -> Arc<dyn RouteMapper> {
        Arc::new(self)
    }
}
