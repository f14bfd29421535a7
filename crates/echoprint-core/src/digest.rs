// SHA-256 digest hex parsing and normalization

/// Error produced when a digest string is not a well-formed SHA-256 hex
/// rendering.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("hash must be 64 hex characters, got {0}")]
    BadLength(usize),
    #[error("hash must be hex")]
    BadHex,
}

/// Parses a 64-character hex digest into 32 raw bytes.
///
/// Uppercase hex is accepted; rejection happens before any use of the
/// digest, so a caller can validate without touching the network.
pub fn parse_digest_hex(s: &str) -> Result<[u8; 32], DigestError> {
    if s.len() != 64 {
        return Err(DigestError::BadLength(s.len()));
    }
    let bytes = hex::decode(s).map_err(|_| DigestError::BadHex)?;
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Normalizes a digest string to the canonical lowercase form, validating
/// it on the way.
pub fn normalize_digest_hex(s: &str) -> Result<String, DigestError> {
    parse_digest_hex(s)?;
    Ok(s.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "abababababababababababababababababababababababababababababababab";

    #[test]
    fn test_parse_round_trips() {
        let bytes = parse_digest_hex(GOOD).unwrap();
        assert_eq!(hex::encode(bytes), GOOD);
    }

    #[test]
    fn test_uppercase_is_accepted_and_normalized() {
        let upper = GOOD.to_ascii_uppercase();
        assert!(parse_digest_hex(&upper).is_ok());
        assert_eq!(normalize_digest_hex(&upper).unwrap(), GOOD);
    }

    #[test]
    fn test_rejects_bad_length() {
        assert_eq!(parse_digest_hex("abcd"), Err(DigestError::BadLength(4)));
        assert!(matches!(
            parse_digest_hex(&"a".repeat(65)),
            Err(DigestError::BadLength(65))
        ));
    }

    #[test]
    fn test_rejects_non_hex() {
        let not_hex = "g".repeat(64);
        assert_eq!(parse_digest_hex(&not_hex), Err(DigestError::BadHex));
        assert_eq!(normalize_digest_hex("not-hex"), Err(DigestError::BadLength(7)));
    }
}
