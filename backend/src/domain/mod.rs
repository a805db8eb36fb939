//! Transport-agnostic domain types and the ports adapters implement.

pub mod error;
pub mod landmark;
pub mod ports;
pub mod rating;
pub mod user;
pub mod walk;

pub use error::{Error, ErrorCode};
pub use landmark::{Landmark, LandmarkId};
pub use rating::{average_score, Rating, Score, Upserted};
pub use user::{CredentialValidationError, Email, PasswordHash, User, UserId};
pub use walk::{RoutePlan, Walk, WalkId, WalkRequest};
