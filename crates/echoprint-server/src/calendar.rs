//! OpenTimestamps calendar client.
//!
//! The calendar is a client of the OTS protocol, not an implementation
//! of it: a 32-byte digest goes up, an opaque receipt comes back, and
//! this module never interprets those bytes. Confirmation is observed
//! later by re-submitting the receipt to the upgrade endpoint.

use reqwest::Client;

use crate::config::CalendarConfig;
use crate::error::AppError;

/// HTTP client for a single calendar server.
pub struct CalendarClient {
    http: Client,
    base_url: String,
}

impl CalendarClient {
    pub fn new(config: &CalendarConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Submits a digest for timestamping.
    ///
    /// Returns the opaque receipt bytes unmodified; the receipt is
    /// pending until an upgrade call observes block inclusion.
    pub async fn submit(&self, digest: &[u8; 32]) -> Result<Vec<u8>, AppError> {
        self.post_raw("/stamp", digest.to_vec()).await
    }

    /// Asks the calendar to upgrade a previously issued receipt. The
    /// returned bytes may be larger once attestations have been added.
    pub async fn upgrade(&self, receipt: &[u8]) -> Result<Vec<u8>, AppError> {
        self.post_raw("/upgrade", receipt.to_vec()).await
    }

    /// POSTs raw bytes and returns raw bytes. Non-2xx answers surface as
    /// upstream errors carrying the calendar's status and body.
    async fn post_raw(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, AppError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
