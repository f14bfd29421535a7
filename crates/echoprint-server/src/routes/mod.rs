//! API routes for the Echoprint server.

pub mod anchor;
pub mod capture;
pub mod records;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::workflow::Workflow;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<Workflow>,
}

impl AppState {
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow: Arc::new(workflow),
        }
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The front-end is served from other origins; the original handlers
    // answered with a wildcard as well.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(capture::routes())
        .merge(anchor::routes())
        .merge(records::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
