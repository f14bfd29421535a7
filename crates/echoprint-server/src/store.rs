//! Record Repository Adapter: the hosted record store, over REST.
//!
//! The store is a Postgres-as-a-service backend reached through its
//! PostgREST interface. This adapter speaks that convention — `apikey` +
//! bearer headers, `on_conflict` upserts with merge-duplicates
//! resolution, `eq.` filters — and exposes typed operations to the rest
//! of the workflow. Concurrent writes for the same conflict key are
//! serialized by the store's own atomic conflict resolution; there is no
//! client-side locking here.

use echoprint_core::AnchorStatus;
use reqwest::{Client, RequestBuilder};
use serde_json::json;

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::models::{NewRecord, StoredRecord};

/// Lookup key for [`RecordStore::find_one`].
#[derive(Debug, Clone, Copy)]
pub enum FindBy<'a> {
    RecordId(&'a str),
    Hash(&'a str),
}

/// REST client for the record table.
pub struct RecordStore {
    http: Client,
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(crate::config::UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, self.config.table)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    /// Inserts a record, updating in place when a row with the same
    /// conflict-key value already exists. Safe to call twice with the
    /// same key; the latest metadata wins.
    pub async fn upsert(&self, row: &NewRecord) -> Result<StoredRecord, AppError> {
        let resp = self
            .authed(self.http.post(self.rows_url()))
            .query(&[
                ("on_conflict", self.config.conflict_key.as_str()),
                ("select", "*"),
            ])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row)
            .send()
            .await?;

        first_row(check(resp).await?).await
    }

    /// Fetches at most one record by id or hash, newest first should the
    /// store ever hold several for the same key.
    pub async fn find_one(&self, by: FindBy<'_>) -> Result<Option<StoredRecord>, AppError> {
        let (column, value) = match by {
            FindBy::RecordId(id) => ("record_id", id),
            FindBy::Hash(hash) => ("hash", hash),
        };

        let filter = format!("eq.{value}");
        let resp = self
            .authed(self.http.get(self.rows_url()))
            .query(&[
                ("select", "*"),
                (column, filter.as_str()),
                ("order", "captured_at.desc"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let rows: Vec<StoredRecord> = parse_rows(check(resp).await?).await?;
        Ok(rows.into_iter().next())
    }

    /// Most recent records, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<StoredRecord>, AppError> {
        let limit = limit.to_string();
        let resp = self
            .authed(self.http.get(self.rows_url()))
            .query(&[
                ("select", "*"),
                ("order", "captured_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        parse_rows(check(resp).await?).await
    }

    /// Writes the anchoring fields of the record identified by `hash`.
    /// The receipt always travels base64-encoded.
    pub async fn set_anchor(
        &self,
        hash: &str,
        receipt_b64: &str,
        status: AnchorStatus,
    ) -> Result<StoredRecord, AppError> {
        let filter = format!("eq.{hash}");
        let resp = self
            .authed(self.http.patch(self.rows_url()))
            .query(&[("hash", filter.as_str()), ("select", "*")])
            .header("Prefer", "return=representation")
            .json(&json!({
                "anchor_receipt": receipt_b64,
                "anchor_status": status,
            }))
            .send()
            .await?;

        // PATCH of a missing row succeeds with an empty representation.
        let rows: Vec<StoredRecord> = parse_rows(check(resp).await?).await?;
        rows.into_iter().next().ok_or(AppError::NotFound)
    }
}

/// Maps non-2xx store answers to `Storage` errors carrying the status
/// and body, so callers can see exactly what the store rejected.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        return Err(AppError::Storage {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(resp)
}

async fn parse_rows(resp: reqwest::Response) -> Result<Vec<StoredRecord>, AppError> {
    resp.json()
        .await
        .map_err(|e| AppError::Internal(format!("unreadable store response: {e}")))
}

async fn first_row(resp: reqwest::Response) -> Result<StoredRecord, AppError> {
    let status = resp.status().as_u16();
    let rows: Vec<StoredRecord> = parse_rows(resp).await?;
    rows.into_iter().next().ok_or(AppError::Storage {
        status,
        detail: "store returned no representation".to_string(),
    })
}
