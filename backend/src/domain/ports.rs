//! Ports implemented by outbound adapters.
//!
//! Handlers depend on these traits, never on Diesel or HTTP types, so the
//! persistence layer and the route-mapping integration stay swappable and
//! mockable in tests.

use async_trait::async_trait;

use super::error::Error;
use super::landmark::{Landmark, LandmarkId};
use super::rating::{Rating, Score, Upserted};
use super::user::{Email, PasswordHash, User, UserId};
use super::walk::{RoutePlan, Walk, WalkRequest};

/// Failures surfaced by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// A uniqueness constraint rejected the write. The storage layer owns
    /// uniqueness; callers treat this as the "already exists" case.
    #[error("record already exists: {0}")]
    Duplicate(String),

    /// The store could not be reached or a connection could not be checked
    /// out of the pool.
    #[error("failed to reach the store: {0}")]
    Connection(String),

    /// The store rejected or failed the query.
    #[error("store query failed: {0}")]
    Query(String),
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(message) => Self::conflict(message),
            RepoError::Connection(message) | RepoError::Query(message) => Self::internal(message),
        }
    }
}

/// Convenient result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Access to registered user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create an account. Returns [`RepoError::Duplicate`] when the email is
    /// already registered.
    async fn create(&self, email: &Email, password_hash: &PasswordHash) -> RepoResult<User>;

    async fn find_by_email(&self, email: &Email) -> RepoResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
}

/// Access to the landmark catalogue.
#[async_trait]
pub trait LandmarkRepository: Send + Sync {
    /// Add a landmark to the catalogue (seed/fixture surface).
    async fn create(&self, name: &str, description: Option<&str>) -> RepoResult<Landmark>;

    async fn find_by_id(&self, id: LandmarkId) -> RepoResult<Option<Landmark>>;

    /// All ratings recorded for this landmark, and nothing else's.
    async fn ratings_for(&self, id: LandmarkId) -> RepoResult<Vec<Rating>>;
}

/// Access to per-user landmark ratings.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Record a score, overwriting any existing rating for the same
    /// `(user, landmark)` pair. The unique index makes this race-free.
    async fn upsert(
        &self,
        user_id: UserId,
        landmark_id: LandmarkId,
        score: Score,
    ) -> RepoResult<Upserted>;

    async fn find_by_user_and_landmark(
        &self,
        user_id: UserId,
        landmark_id: LandmarkId,
    ) -> RepoResult<Option<Rating>>;

    /// The user's ratings joined with the landmarks they score, for the
    /// profile page.
    async fn ratings_with_landmarks_for_user(
        &self,
        user_id: UserId,
    ) -> RepoResult<Vec<(Rating, Landmark)>>;
}

/// Access to persisted walks and their landmark links.
#[async_trait]
pub trait WalkRepository: Send + Sync {
    /// Persist a walk and the landmarks its route passes through.
    async fn create(
        &self,
        user_id: UserId,
        request: &WalkRequest,
        landmarks: &[LandmarkId],
    ) -> RepoResult<Walk>;

    async fn walks_for_user(&self, user_id: UserId) -> RepoResult<Vec<Walk>>;
}

/// External route-mapping integration.
///
/// Mapping a walk onto landmarks needs a directions service; deployments
/// without one get a structured `service_unavailable` response instead of a
/// half-wired feature.
#[async_trait]
pub trait RouteMapper: Send + Sync {
    async fn plan(&self, request: &WalkRequest) -> Result<RoutePlan, Error>;
}
