//! Ratings: one user's numeric score for one landmark.

use serde::{Deserialize, Serialize};

use super::landmark::LandmarkId;
use super::user::UserId;

/// A user-supplied score. Form input that does not parse as an integer is
/// rejected before it reaches the domain.
pub type Score = i32;

/// One user's score for one landmark. At most one exists per
/// `(user, landmark)` pair; repeat submissions overwrite the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i32,
    pub user_id: UserId,
    pub landmark_id: LandmarkId,
    pub score: Score,
}

/// Outcome of recording a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// First rating for this `(user, landmark)` pair.
    Created,
    /// An existing rating's score was overwritten.
    Updated,
}

/// Mean score over one landmark's own ratings.
///
/// Returns `None` when the landmark has no ratings; callers render the
/// absence instead of dividing by zero. Scores from other landmarks must
/// never be included.
pub fn average_score(scores: &[Score]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().copied().map(f64::from).sum();
    Some(sum / scores.len() as f64)
}
