//! Shared types for the Echoprint notarization workflow.

use serde::{Deserialize, Serialize};

/// Anchoring state of a record.
///
/// `None` until anchoring is requested, `Pending` once a calendar receipt
/// exists, `Anchored` once block inclusion has been observed. The state
/// only ever moves forward; `Anchored` never regresses to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStatus {
    #[default]
    None,
    Pending,
    Anchored,
}

impl AnchorStatus {
    /// Combine a stored status with a freshly classified one, keeping
    /// the workflow monotonic.
    pub fn advance(self, observed: AnchorStatus) -> AnchorStatus {
        if self == AnchorStatus::Anchored {
            AnchorStatus::Anchored
        } else {
            observed
        }
    }
}

/// The caller-supplied fields a fingerprint is computed over.
///
/// All fields are optional, but at least one of `permalink`, `title`,
/// `text` must be non-empty for a fingerprint to exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureFields {
    /// Canonical URL of the content.
    pub permalink: Option<String>,
    /// Title of the content.
    pub title: Option<String>,
    /// Body text of the content.
    pub text: Option<String>,
    /// Caller-claimed origin time, ISO 8601. Participates in the hash
    /// join verbatim, exactly as supplied.
    pub sent_at_iso: Option<String>,
}
