//! Walks: planned routes between an origin and destination.
//!
//! Route mapping itself is an external-service concern behind the
//! [`RouteMapper`](super::ports::RouteMapper) port; the domain only records
//! the resulting plan.

use serde::{Deserialize, Serialize};

use super::landmark::LandmarkId;
use super::user::UserId;

/// Stable walk identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalkId(pub i32);

/// What the user asked for: free-form origin, destination, and time budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRequest {
    pub origin: String,
    pub destination: String,
    pub time_budget: String,
}

/// A mapped route: the landmarks the walk passes through, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub landmarks: Vec<LandmarkId>,
}

/// A persisted walk belonging to one user.
#[derive(Debug, Clone, Serialize)]
pub struct Walk {
    pub id: WalkId,
    pub user_id: UserId,
    pub origin: String,
    pub destination: String,
    pub time_budget: String,
}
