//! Scan validation. Pure so it can be tested without touching ledger state;
//! the caller applies the ledger append on [`ScanOutcome::Accepted`].

use crate::ledger::TallyLedger;
use crate::manifest::{ItemId, Manifest};

/// Result of validating one scanned or typed code against the manifest and
/// the current tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Code matched an entry with remaining quantity. Carries the canonical
    /// manifest id, not the raw input.
    Accepted(ItemId),
    /// No manifest entry matches the code.
    UnknownCode,
    /// Entry exists but is already at its expected quantity.
    AlreadyFulfilled(ItemId),
}

/// Validates `code` with a case-insensitive exact match after trimming
/// surrounding whitespace. No mutation.
pub fn validate(code: &str, manifest: &Manifest, ledger: &TallyLedger) -> ScanOutcome {
    let code = code.trim();
    if code.is_empty() {
        return ScanOutcome::UnknownCode;
    }
    match manifest.lookup(code) {
        Some(entry) => {
            if ledger.count(&entry.id) >= entry.expected_quantity {
                ScanOutcome::AlreadyFulfilled(entry.id.clone())
            } else {
                ScanOutcome::Accepted(entry.id.clone())
            }
        }
        None => ScanOutcome::UnknownCode,
    }
}
