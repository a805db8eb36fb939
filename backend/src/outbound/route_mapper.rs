//! Route-mapper adapters.
//!
//! Mapping a walk onto landmarks requires an external directions service.
//! Deployments without one run the [`UnconfiguredRouteMapper`], which turns
//! every request into a structured `service_unavailable` response instead of
//! leaving a half-wired feature in the route table.

use async_trait::async_trait;

use crate::domain::ports::RouteMapper;
use crate::domain::{Error, RoutePlan, WalkRequest};

/// Placeholder adapter used when no directions service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRouteMapper;

#[async_trait]
impl RouteMapper for UnconfiguredRouteMapper {
    async fn plan(&self, _request: &WalkRequest) -> Result<RoutePlan, Error> {
        Err(Error::unavailable(
            "route mapping is not configured on this deployment",
        ))
    }
}
