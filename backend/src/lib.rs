//! Waymark: a web backend for rating landmarks along walking routes.
//!
//! Users register, log in, score landmarks, and view a profile of their
//! ratings and walks. Hexagonal layout: `domain` holds the types and ports,
//! `inbound::http` the Actix handlers, `outbound` the Diesel/SQLite
//! adapters and the route-mapper seam.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
