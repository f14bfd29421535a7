//! Anchoring endpoints: calendar submit and receipt upgrade.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use echoprint_core::AnchorStatus;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct AnchorBody {
    /// 64-hex SHA-256 fingerprint to submit for timestamping.
    pub hash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpgradeBody {
    /// Base64 of the receipt returned by a previous anchor call.
    pub receipt_b64: Option<String>,
    /// Optional fingerprint identifying the stored record to refresh.
    pub hash: Option<String>,
}

#[derive(Serialize)]
pub struct AnchorResponse {
    pub ok: bool,
    pub status: AnchorStatus,
    pub receipt_b64: String,
}

/// POST /anchor
///
/// Submits a fingerprint to the calendar. 400 on a malformed hash
/// (before any network call), 502 when the calendar fails.
async fn anchor(
    State(state): State<AppState>,
    Json(body): Json<AnchorBody>,
) -> Result<Json<AnchorResponse>, AppError> {
    let hash = body
        .hash
        .ok_or_else(|| AppError::Validation("hash must be 64-hex sha256".to_string()))?;

    let outcome = state.workflow.anchor(&hash).await?;
    Ok(Json(AnchorResponse {
        ok: true,
        status: outcome.status,
        receipt_b64: outcome.receipt_b64,
    }))
}

/// POST /anchor/upgrade
///
/// Asks the calendar to refresh a receipt toward `anchored`. A `pending`
/// answer means confirmation is not yet observable, not that anchoring
/// failed.
async fn upgrade(
    State(state): State<AppState>,
    Json(body): Json<UpgradeBody>,
) -> Result<Json<AnchorResponse>, AppError> {
    let receipt_b64 = body
        .receipt_b64
        .ok_or_else(|| AppError::Validation("receipt_b64 is required".to_string()))?;

    let outcome = state
        .workflow
        .upgrade(&receipt_b64, body.hash.as_deref())
        .await?;
    Ok(Json(AnchorResponse {
        ok: true,
        status: outcome.status,
        receipt_b64: outcome.receipt_b64,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/anchor", post(anchor))
        .route("/anchor/upgrade", post(upgrade))
}
