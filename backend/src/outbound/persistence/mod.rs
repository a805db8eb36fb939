//! Diesel/SQLite persistence adapters for the domain ports.

pub mod diesel_helpers;
pub mod diesel_landmark_repository;
pub mod diesel_rating_repository;
pub mod diesel_user_repository;
pub mod diesel_walk_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_landmark_repository::DieselLandmarkRepository;
pub use diesel_rating_repository::DieselRatingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_walk_repository::DieselWalkRepository;
pub use pool::{run_migrations, DbPool, PoolConfig, PoolError};
