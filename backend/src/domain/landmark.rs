//! Landmarks: the points of interest a walking route passes through.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable landmark identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkId(pub i32);

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point of interest users can rate.
#[derive(Debug, Clone, Serialize)]
pub struct Landmark {
    pub id: LandmarkId,
    pub name: String,
    pub description: Option<String>,
}
