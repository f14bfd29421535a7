//! Record row types, as stored in (and read back from) the record store.

use chrono::{DateTime, Utc};
use echoprint_core::AnchorStatus;
use serde::{Deserialize, Serialize};

/// A notarized record as the store returns it.
///
/// `hash` and `record_id` are immutable once the row exists; only the
/// anchoring fields are ever written again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Sortable id, `ECP-YYYYMMDDHHMMSSmmm`.
    pub record_id: String,
    pub title: Option<String>,
    pub platform: Option<String>,
    pub author_handle: Option<String>,
    pub permalink: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    /// SHA-256 fingerprint, 64 lowercase hex chars.
    pub hash: String,
    /// Caller-claimed origin time.
    pub sent_at: Option<DateTime<Utc>>,
    /// Server receipt time.
    pub captured_at: DateTime<Utc>,
    /// Base64-encoded opaque calendar receipt, once anchoring was
    /// requested.
    #[serde(default)]
    pub anchor_receipt: Option<String>,
    #[serde(default)]
    pub anchor_status: AnchorStatus,
}

/// Payload for inserting a record. Upserted on the configured conflict
/// key, so capturing identical content twice updates in place instead of
/// duplicating rows.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord {
    pub record_id: String,
    pub title: Option<String>,
    pub platform: Option<String>,
    pub author_handle: Option<String>,
    pub permalink: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub hash: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub captured_at: DateTime<Utc>,
    /// Set on first insert only. A re-capture leaves this column out of
    /// the payload so merge-duplicates cannot disturb the stored
    /// anchoring state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_status: Option<AnchorStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_record_defaults_anchor_fields() {
        // Rows written before anchoring was requested carry neither
        // anchor column.
        let json = serde_json::json!({
            "record_id": "ECP-20250101000000000",
            "title": "Post A",
            "platform": null,
            "author_handle": null,
            "permalink": "https://x.test/a",
            "url": null,
            "text": "hello",
            "hash": "ab".repeat(32),
            "sent_at": null,
            "captured_at": "2025-01-01T00:00:00Z"
        });

        let record: StoredRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.anchor_status, AnchorStatus::None);
        assert!(record.anchor_receipt.is_none());
        assert_eq!(record.hash.len(), 64);
    }

    fn new_record(anchor_status: Option<AnchorStatus>) -> NewRecord {
        NewRecord {
            record_id: "ECP-20250101000000000".into(),
            title: None,
            platform: None,
            author_handle: None,
            permalink: Some("https://x.test/a".into()),
            url: None,
            text: None,
            hash: "ab".repeat(32),
            sent_at: None,
            captured_at: Utc::now(),
            anchor_status,
        }
    }

    #[test]
    fn test_new_record_serializes_status_lowercase() {
        let json = serde_json::to_value(new_record(Some(AnchorStatus::None))).unwrap();
        assert_eq!(json["anchor_status"], "none");
        assert_eq!(json["record_id"], "ECP-20250101000000000");
    }

    #[test]
    fn test_new_record_omits_anchor_status_when_unset() {
        let json = serde_json::to_value(new_record(None)).unwrap();
        assert!(json.get("anchor_status").is_none());
    }
}
