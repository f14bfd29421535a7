// Content fingerprinting: canonical join + SHA-256

use sha2::{Digest, Sha256};

use crate::types::CaptureFields;

/// Error produced when a fingerprint cannot be computed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("provide at least permalink or title/text")]
    EmptyContent,
}

/// Builds the canonical string a fingerprint is computed over.
///
/// The join is `permalink|title|text|sentAtIso` with a literal `|`
/// separator and empty strings for missing fields. This exact order and
/// separator must be preserved bit-for-bit: changing it would break
/// compatibility with every previously stored hash.
pub fn canonical_string(fields: &CaptureFields) -> String {
    [
        fields.permalink.as_deref().unwrap_or(""),
        fields.title.as_deref().unwrap_or(""),
        fields.text.as_deref().unwrap_or(""),
        fields.sent_at_iso.as_deref().unwrap_or(""),
    ]
    .join("|")
}

/// Computes the content fingerprint: SHA-256 over the UTF-8 canonical
/// string, rendered as lowercase hex.
///
/// Pure and deterministic; identical inputs always yield the identical
/// hash. Fails when `permalink`, `title`, and `text` are all empty.
pub fn compute_hash(fields: &CaptureFields) -> Result<String, FingerprintError> {
    let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
    if !non_empty(&fields.permalink) && !non_empty(&fields.title) && !non_empty(&fields.text) {
        return Err(FingerprintError::EmptyContent);
    }

    let mut hasher = Sha256::new();
    hasher.update(canonical_string(fields).as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(
        permalink: Option<&str>,
        title: Option<&str>,
        text: Option<&str>,
        sent_at: Option<&str>,
    ) -> CaptureFields {
        CaptureFields {
            permalink: permalink.map(String::from),
            title: title.map(String::from),
            text: text.map(String::from),
            sent_at_iso: sent_at.map(String::from),
        }
    }

    #[test]
    fn test_canonical_string_join_order() {
        let f = fields(
            Some("https://x.test/a"),
            Some("Post A"),
            Some("hello"),
            Some("2025-01-01T00:00:00Z"),
        );
        assert_eq!(
            canonical_string(&f),
            "https://x.test/a|Post A|hello|2025-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_canonical_string_missing_fields_default_to_empty() {
        let f = fields(None, Some("Post A"), None, None);
        assert_eq!(canonical_string(&f), "|Post A||");
    }

    #[test]
    fn test_compute_hash_matches_known_vector() {
        // SHA-256 of "https://x.test/a|Post A|hello|2025-01-01T00:00:00Z",
        // cross-checked against the reference canon string.
        let f = fields(
            Some("https://x.test/a"),
            Some("Post A"),
            Some("hello"),
            Some("2025-01-01T00:00:00Z"),
        );
        let hash = compute_hash(&f).unwrap();
        let mut hasher = Sha256::new();
        hasher.update(b"https://x.test/a|Post A|hello|2025-01-01T00:00:00Z");
        assert_eq!(hash, hex::encode(hasher.finalize()));
    }

    #[test]
    fn test_compute_hash_is_deterministic() {
        let f = fields(Some("https://x.test/a"), Some("t"), Some("body"), None);
        assert_eq!(compute_hash(&f).unwrap(), compute_hash(&f).unwrap());
    }

    #[test]
    fn test_compute_hash_is_64_lowercase_hex() {
        let f = fields(None, None, Some("hello"), None);
        let hash = compute_hash(&f).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn test_compute_hash_rejects_empty_content() {
        assert_eq!(
            compute_hash(&CaptureFields::default()),
            Err(FingerprintError::EmptyContent)
        );
        // Empty strings count as missing, same as the boundary check.
        let f = fields(Some(""), Some(""), Some(""), Some("2025-01-01T00:00:00Z"));
        assert_eq!(compute_hash(&f), Err(FingerprintError::EmptyContent));
    }

    #[test]
    fn test_sent_at_changes_the_hash() {
        let a = fields(Some("https://x.test/a"), None, None, None);
        let b = fields(
            Some("https://x.test/a"),
            None,
            None,
            Some("2025-01-01T00:00:00Z"),
        );
        assert_ne!(compute_hash(&a).unwrap(), compute_hash(&b).unwrap());
    }
}
