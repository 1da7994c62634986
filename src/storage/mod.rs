pub mod json_backend;
pub mod memory;

use std::collections::HashSet;

use crate::{domain::Ledger, errors::Result};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Key under which the ledger blob is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "financeData";

/// Opaque key-value persistence for serialized ledgers.
pub trait BlobStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;
    /// Replaces the stored value in full.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Detects duplicate ids and blank names within a restored ledger.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let mut warnings = Vec::new();
    for category in crate::domain::EntryCategory::ALL {
        let mut seen = HashSet::new();
        for entry in ledger.entries(category) {
            if !seen.insert(entry.id) {
                warnings.push(format!(
                    "{} contains duplicate entry id {}",
                    category.key(),
                    entry.id
                ));
            }
            if entry.name.trim().is_empty() {
                warnings.push(format!(
                    "{} entry {} has an empty name",
                    category.key(),
                    entry.id
                ));
            }
        }
    }
    warnings
}
