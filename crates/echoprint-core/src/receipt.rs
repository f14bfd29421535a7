// Best-effort classification of opaque calendar receipts

/// Scans an opaque OpenTimestamps receipt for Bitcoin attestation markers.
///
/// The calendar protocol does not expose a boolean "is this anchored";
/// upgraded receipts that carry a Bitcoin block attestation happen to
/// contain recognizable ASCII markers, and this scan looks for them in a
/// lossy decoding of the bytes. The bias is strictly false-negative:
/// `false` means confirmation is not yet observable, never that anchoring
/// failed. Swap this for a real protocol parser without touching the rest
/// of the workflow.
pub fn looks_anchored(receipt: &[u8]) -> bool {
    let ascii = String::from_utf8_lossy(receipt).to_ascii_lowercase();
    ascii.contains("bitcoin") || ascii.contains("block")
}
