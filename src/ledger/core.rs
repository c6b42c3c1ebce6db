use std::collections::HashMap;

use serde::Serialize;

use crate::manifest::{ItemId, Manifest};

/// Ordered multiset of fulfilled item ids. One occurrence per fulfilled
/// unit; the most recent occurrence of an id is the one removed first.
///
/// The ledger is a pure container: the scan-path cap (`count <= expected`)
/// is the validator's precondition, not enforced here, so the edit path can
/// drive counts directly.
#[derive(Debug, Clone, Default)]
pub struct TallyLedger {
    entries: Vec<ItemId>,
}

impl TallyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrences of `id` in the ledger.
    pub fn count(&self, id: &str) -> u32 {
        self.entries.iter().filter(|entry| entry.as_str() == id).count() as u32
    }

    /// Per-item counts for the whole ledger.
    pub fn counts(&self) -> HashMap<ItemId, u32> {
        let mut counts = HashMap::new();
        for id in &self.entries {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn append(&mut self, id: ItemId) {
        self.entries.push(id);
    }

    /// Removes the most recently added occurrence of `id`. Returns whether a
    /// removal happened.
    pub fn remove_last(&mut self, id: &str) -> bool {
        match self.entries.iter().rposition(|entry| entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_fulfilled(&self, id: &str, manifest: &Manifest) -> bool {
        manifest
            .expected(id)
            .is_some_and(|expected| self.count(id) >= expected)
    }

    /// True iff every manifest entry has reached its expected quantity.
    /// Vacuously true for an empty manifest; completion gating guards that
    /// case separately.
    pub fn all_fulfilled(&self, manifest: &Manifest) -> bool {
        manifest
            .entries()
            .iter()
            .all(|entry| self.count(&entry.id) >= entry.expected_quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fulfillment-ordered copy of the ledger contents.
    pub fn snapshot(&self) -> Vec<ItemId> {
        self.entries.clone()
    }
}

/// Derived split of manifest entries by completion, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub fulfilled: Vec<ItemId>,
    pub remaining: Vec<ItemId>,
}

pub fn partition(manifest: &Manifest, ledger: &TallyLedger) -> Partition {
    let mut fulfilled = Vec::new();
    let mut remaining = Vec::new();
    for entry in manifest.entries() {
        if ledger.count(&entry.id) >= entry.expected_quantity {
            fulfilled.push(entry.id.clone());
        } else {
            remaining.push(entry.id.clone());
        }
    }
    Partition {
        fulfilled,
        remaining,
    }
}

/// Capped progress figures. Overfulfilled counts (possible via the edit
/// path racing a manifest change, defensively) never push `fulfilled_units`
/// past `expected_units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub fulfilled_units: u64,
    pub expected_units: u64,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.expected_units == 0 {
            0.0
        } else {
            self.fulfilled_units as f64 * 100.0 / self.expected_units as f64
        }
    }
}

pub fn progress(manifest: &Manifest, ledger: &TallyLedger) -> Progress {
    let fulfilled_units = manifest
        .entries()
        .iter()
        .map(|entry| u64::from(ledger.count(&entry.id).min(entry.expected_quantity)))
        .sum();
    Progress {
        fulfilled_units,
        expected_units: manifest.total_expected(),
    }
}

/// Blake3 fingerprint of the per-entry counts in manifest order. Two ledger
/// states with identical counts hash identically regardless of fulfillment
/// order, so consumers can cheaply detect whether a derived view changed.
pub fn count_fingerprint(manifest: &Manifest, ledger: &TallyLedger) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    for entry in manifest.entries() {
        hasher.update(entry.id.as_bytes());
        hasher.update(&ledger.count(&entry.id).to_le_bytes());
    }
    hasher.finalize()
}
