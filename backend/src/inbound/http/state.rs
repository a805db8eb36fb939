//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable with stub adapters.

use std::sync::Arc;

use crate::domain::ports::{
    LandmarkRepository, RatingRepository, RouteMapper, UserRepository, WalkRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselLandmarkRepository, DieselRatingRepository, DieselUserRepository,
    DieselWalkRepository,
};
use crate::outbound::route_mapper::UnconfiguredRouteMapper;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub landmarks: Arc<dyn LandmarkRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub walks: Arc<dyn WalkRepository>,
    pub route_mapper: Arc<dyn RouteMapper>,
}

impl HttpState {
    /// Wire every repository port to its Diesel adapter over the shared
    /// pool, with route mapping unconfigured.
    pub fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            landmarks: Arc::new(DieselLandmarkRepository::new(pool.clone())),
            ratings: Arc::new(DieselRatingRepository::new(pool.clone())),
            walks: Arc::new(DieselWalkRepository::new(pool.clone())),
            route_mapper: Arc::new(UnconfiguredRouteMapper),
        }
    }

    /// Swap in a configured route-mapping integration.
    #[must_use]
    pub fn with_route_mapper(mut self, route_mapper: Arc<dyn RouteMapper>) -> Self {
        self.route_mapper = route_mapper;
        self
    }
}
