use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Item identifier as printed on the barcode label.
pub type ItemId = String;

/// One line of the order manifest. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: ItemId,
    pub name: String,
    pub expected_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_location: Option<String>,
}

impl ManifestEntry {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, expected_quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expected_quantity,
            bin_location: None,
        }
    }

    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin_location = Some(bin.into());
        self
    }
}

/// The fixed set of manifest entries for one session, in load order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Validates that ids are distinct and every quantity is positive.
    pub fn new(entries: Vec<ManifestEntry>) -> Result<Self> {
        for (idx, entry) in entries.iter().enumerate() {
            if entry.expected_quantity == 0 {
                return Err(SessionError::ZeroQuantity(entry.id.clone()));
            }
            let duplicated = entries[..idx]
                .iter()
                .any(|prior| prior.id.eq_ignore_ascii_case(&entry.id));
            if duplicated {
                return Err(SessionError::DuplicateEntry(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by canonical id.
    pub fn get(&self, id: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Case-insensitive exact match against a scanned or typed code. No
    /// fuzzy matching; surrounding whitespace is the caller's problem.
    pub fn lookup(&self, code: &str) -> Option<&ManifestEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(code))
    }

    pub fn expected(&self, id: &str) -> Option<u32> {
        self.get(id).map(|entry| entry.expected_quantity)
    }

    /// Total units the session must fulfill.
    pub fn total_expected(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.expected_quantity))
            .sum()
    }
}
