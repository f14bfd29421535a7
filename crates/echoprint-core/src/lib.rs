// Echoprint Core - content fingerprinting and receipt primitives

pub mod digest;
pub mod fingerprint;
pub mod receipt;
pub mod record_id;
pub mod types;

pub use digest::{normalize_digest_hex, parse_digest_hex, DigestError};
pub use fingerprint::{canonical_string, compute_hash, FingerprintError};
pub use receipt::looks_anchored;
pub use record_id::record_id_at;
pub use types::{AnchorStatus, CaptureFields};
