//! Outbound adapters: persistence and external integrations.

pub mod persistence;
pub mod route_mapper;
