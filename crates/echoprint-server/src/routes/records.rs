//! Record lookup endpoints: verify and recent.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::StoredRecord;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub record_id: Option<String>,
    pub hash: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub ok: bool,
    pub record: StoredRecord,
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct RecentResponse {
    pub ok: bool,
    pub rows: Vec<StoredRecord>,
}

/// GET /verify?record_id=|hash=
///
/// 404 when no record matches either key.
async fn verify(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<Json<VerifyResponse>, AppError> {
    let record = state
        .workflow
        .verify(params.record_id.as_deref(), params.hash.as_deref())
        .await?;
    Ok(Json(VerifyResponse { ok: true, record }))
}

/// GET /recent?limit=
///
/// Newest first; the limit defaults to 12 and is clamped to 50.
async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<RecentResponse>, AppError> {
    let rows = state.workflow.recent(params.limit).await?;
    Ok(Json(RecentResponse { ok: true, rows }))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify))
        .route("/recent", get(recent))
}
