//! Capture endpoint: fingerprint content metadata and persist a record.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::models::StoredRecord;
use crate::workflow::CaptureRequest;

use super::AppState;

#[derive(Serialize)]
pub struct CaptureResponse {
    pub ok: bool,
    pub record: StoredRecord,
}

/// POST /capture
///
/// Body `{title?, permalink?, text?, sent_at?, platform?, url?,
/// author_handle?}`. At least one of `permalink`, `title`, `text` must be
/// non-empty. Returns the stored record, including its minted
/// `record_id` and fingerprint `hash`.
async fn capture(
    State(state): State<AppState>,
    Json(req): Json<CaptureRequest>,
) -> Result<Json<CaptureResponse>, AppError> {
    let record = state.workflow.capture(req).await?;
    Ok(Json(CaptureResponse { ok: true, record }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/capture", post(capture))
}
