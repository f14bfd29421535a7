//! Notarization workflow: fingerprint, persist, anchor, upgrade.
//!
//! One capture request walks `DRAFT → FINGERPRINTED → PERSISTED`; a
//! later anchor request moves the record to `ANCHOR_PENDING`, and
//! caller-driven upgrade polling moves it to `ANCHOR_CONFIRMED` once the
//! chain confirms. Every stage completes or fails within its own
//! request; there are no background retries and no client-side locks.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use echoprint_core::record_id::is_record_id;
use echoprint_core::{
    compute_hash, looks_anchored, normalize_digest_hex, parse_digest_hex, record_id_at,
    AnchorStatus, CaptureFields,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::calendar::CalendarClient;
use crate::error::AppError;
use crate::models::{NewRecord, StoredRecord};
use crate::store::{FindBy, RecordStore};

/// Default page size for recent-records listings.
pub const DEFAULT_RECENT_LIMIT: u32 = 12;
/// Hard cap on recent-records listings; larger requests are clamped,
/// not rejected.
pub const MAX_RECENT_LIMIT: u32 = 50;

/// Caller-supplied content metadata for a capture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureRequest {
    pub title: Option<String>,
    pub permalink: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub platform: Option<String>,
    pub author_handle: Option<String>,
    /// ISO 8601 origin time claimed by the caller.
    pub sent_at: Option<String>,
}

/// Result of an anchor submit or upgrade.
#[derive(Debug, Clone)]
pub struct AnchorOutcome {
    pub status: AnchorStatus,
    pub receipt_b64: String,
}

/// The notarization workflow engine.
pub struct Workflow {
    calendar: CalendarClient,
    store: RecordStore,
}

impl Workflow {
    pub fn new(calendar: CalendarClient, store: RecordStore) -> Self {
        Self { calendar, store }
    }

    /// Fingerprints the supplied metadata and persists the record.
    ///
    /// The hash is computed exactly once here and never recomputed; the
    /// upsert makes a repeated capture of identical content update the
    /// existing row instead of minting a duplicate.
    pub async fn capture(&self, req: CaptureRequest) -> Result<StoredRecord, AppError> {
        let sent_at = parse_sent_at(req.sent_at.as_deref())?;

        let fields = CaptureFields {
            permalink: req.permalink.clone(),
            title: req.title.clone(),
            text: req.text.clone(),
            sent_at_iso: req.sent_at.clone(),
        };
        let hash = compute_hash(&fields)?;

        // Re-capturing known content refreshes its metadata but must not
        // disturb identity or anchoring: the stored record keeps its
        // record_id and captured_at, and the anchor column stays out of
        // the payload so the merge cannot reset it.
        let existing = self.store.find_one(FindBy::Hash(&hash)).await?;

        let now = Utc::now();
        let (record_id, captured_at, anchor_status) = match &existing {
            Some(row) => (row.record_id.clone(), row.captured_at, None),
            None => (
                record_id_at(sent_at.unwrap_or(now)),
                now,
                Some(AnchorStatus::None),
            ),
        };

        let row = NewRecord {
            record_id,
            title: req.title,
            platform: req.platform,
            author_handle: req.author_handle,
            permalink: req.permalink,
            url: req.url,
            text: req.text,
            hash: hash.clone(),
            sent_at,
            captured_at,
            anchor_status,
        };

        let stored = self.store.upsert(&row).await?;
        info!(record_id = %stored.record_id, hash = %stored.hash, "record captured");
        Ok(stored)
    }

    /// Submits a fingerprint to the calendar and persists the pending
    /// receipt.
    ///
    /// Validation happens before any network call; a calendar failure
    /// leaves the stored record untouched.
    pub async fn anchor(&self, hash_hex: &str) -> Result<AnchorOutcome, AppError> {
        let digest = parse_digest_hex(hash_hex)?;
        let hash = hash_hex.to_ascii_lowercase();

        let receipt = self.calendar.submit(&digest).await?;
        let receipt_b64 = BASE64_STANDARD.encode(&receipt);

        match self.store.find_one(FindBy::Hash(&hash)).await? {
            // The digest may not correspond to a captured record; the
            // receipt is still valid and goes back to the caller.
            None => {
                warn!(hash = %hash, "no stored record for digest; receipt not persisted")
            }
            Some(row) => {
                // Same monotonicity rule as the upgrade path: a fresh
                // pending receipt must not displace an attested one.
                if row.anchor_status.advance(AnchorStatus::Pending) == AnchorStatus::Anchored {
                    info!(hash = %hash, "record already anchored; keeping attested receipt");
                    return Ok(AnchorOutcome {
                        status: AnchorStatus::Anchored,
                        receipt_b64: row.anchor_receipt.unwrap_or(receipt_b64),
                    });
                }
                self.store
                    .set_anchor(&hash, &receipt_b64, AnchorStatus::Pending)
                    .await?;
                info!(hash = %hash, "anchor receipt persisted");
            }
        }

        Ok(AnchorOutcome {
            status: AnchorStatus::Pending,
            receipt_b64,
        })
    }

    /// Asks the calendar to upgrade a receipt and classifies the result.
    ///
    /// When the caller names the record by hash, the refreshed receipt
    /// and status are persisted; the stored status is monotonic, so an
    /// `anchored` record never regresses to `pending` even if the
    /// classifier cannot see the attestation. A calendar failure returns
    /// an error and never discards the last-known-good receipt.
    pub async fn upgrade(
        &self,
        receipt_b64: &str,
        hash_hex: Option<&str>,
    ) -> Result<AnchorOutcome, AppError> {
        if receipt_b64.is_empty() {
            return Err(AppError::Validation("receipt_b64 is required".to_string()));
        }
        let receipt = BASE64_STANDARD
            .decode(receipt_b64)
            .map_err(|_| AppError::Validation("receipt_b64 is not valid base64".to_string()))?;
        if receipt.is_empty() {
            return Err(AppError::Validation("receipt_b64 is empty".to_string()));
        }

        let upgraded = self.calendar.upgrade(&receipt).await?;
        let observed = if looks_anchored(&upgraded) {
            AnchorStatus::Anchored
        } else {
            AnchorStatus::Pending
        };
        let upgraded_b64 = BASE64_STANDARD.encode(&upgraded);

        let status = if let Some(h) = hash_hex {
            let hash = normalize_digest_hex(h)?;
            let stored = self
                .store
                .find_one(FindBy::Hash(&hash))
                .await?
                .ok_or(AppError::NotFound)?;

            let status = stored.anchor_status.advance(observed);
            self.store.set_anchor(&hash, &upgraded_b64, status).await?;
            info!(hash = %hash, status = ?status, "upgraded receipt persisted");
            status
        } else {
            observed
        };

        Ok(AnchorOutcome {
            status,
            receipt_b64: upgraded_b64,
        })
    }

    /// Looks a record up by id or hash.
    pub async fn verify(
        &self,
        record_id: Option<&str>,
        hash: Option<&str>,
    ) -> Result<StoredRecord, AppError> {
        let normalized;
        let by = match (record_id, hash) {
            (Some(id), _) => {
                if !is_record_id(id) {
                    return Err(AppError::Validation("malformed record_id".to_string()));
                }
                FindBy::RecordId(id)
            }
            (None, Some(h)) => {
                normalized = normalize_digest_hex(h)?;
                FindBy::Hash(&normalized)
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "Missing record_id or hash".to_string(),
                ))
            }
        };

        self.store.find_one(by).await?.ok_or(AppError::NotFound)
    }

    /// Lists recent records, newest first. The limit defaults to
    /// [`DEFAULT_RECENT_LIMIT`] and is clamped to [`MAX_RECENT_LIMIT`].
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<StoredRecord>, AppError> {
        self.store.recent(clamp_limit(limit)).await
    }
}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}

/// `sent_at` must be real RFC 3339 when present; the verbatim string
/// still feeds the hash join.
fn parse_sent_at(sent_at: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match sent_at {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| AppError::Validation(format!("invalid sent_at: {e}"))),
    }
}
