//! Echoprint Server - content notarization API
//!
//! This crate provides the REST API for recording content fingerprints,
//! anchoring them to Bitcoin via an OpenTimestamps calendar, and serving
//! verification lookups. Durable storage lives in a hosted Postgres
//! store reached over its REST interface; all blockchain interaction is
//! delegated to the calendar service.

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod workflow;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::{create_router, AppState};
pub use workflow::Workflow;
