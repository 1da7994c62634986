//! Owned ledger state plus its write-through persistence.

use tracing::{debug, info, warn};

use crate::core::time::Clock;
use crate::domain::{Entry, EntryCategory, EntryId, Ledger};
use crate::errors::{LedgerError, Result};
use crate::storage::{ledger_warnings, BlobStore};

/// Decodes a persisted blob, reporting malformed content as [`LedgerError::CorruptBlob`].
pub fn decode_ledger(raw: &str) -> Result<Ledger> {
    serde_json::from_str(raw).map_err(|err| LedgerError::CorruptBlob(err.to_string()))
}

pub fn encode_ledger(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string(ledger)?)
}

/// Reads the ledger stored under `key`. Missing, unreadable or corrupt blobs
/// degrade to the empty ledger; the failure is only logged.
pub fn load_ledger(storage: &dyn BlobStore, key: &str) -> Ledger {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored ledger, starting empty");
            return Ledger::new();
        }
        Err(err) => {
            warn!(key, error = %err, "failed to read stored ledger, starting empty");
            return Ledger::new();
        }
    };
    match decode_ledger(&raw) {
        Ok(ledger) => {
            for warning in ledger_warnings(&ledger) {
                warn!(key, "{warning}");
            }
            ledger
        }
        Err(err) => {
            warn!(key, error = %err, "discarding corrupt ledger blob");
            Ledger::new()
        }
    }
}

/// Facade that owns the in-memory ledger and writes it through on every mutation.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn BlobStore>,
    key: String,
    clock: Box<dyn Clock>,
    last_id: EntryId,
}

impl LedgerStore {
    /// Opens the store and restores whatever is persisted under `key`.
    pub fn open(storage: Box<dyn BlobStore>, key: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            ledger: Ledger::new(),
            storage,
            key: key.into(),
            clock,
            last_id: 0,
        };
        store.load();
        store
    }

    /// Replaces the in-memory state with the persisted one.
    pub fn load(&mut self) -> &Ledger {
        self.ledger = load_ledger(self.storage.as_ref(), &self.key);
        self.last_id = self.ledger.max_id().unwrap_or(0);
        info!(
            key = %self.key,
            income = self.ledger.income.len(),
            fixed = self.ledger.fixed_expenses.len(),
            variable = self.ledger.variable_expenses.len(),
            "ledger loaded"
        );
        &self.ledger
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &Ledger {
        &self.ledger
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Points the store at another blob key and loads whatever it holds.
    pub fn switch_key(&mut self, key: impl Into<String>) -> &Ledger {
        self.key = key.into();
        self.load()
    }

    /// Validates and appends a new entry, then persists the full ledger.
    ///
    /// If the write fails the entry is dropped again and the error returned.
    pub fn add_entry(
        &mut self,
        category: EntryCategory,
        name: &str,
        amount: f64,
        date: &str,
    ) -> Result<Entry> {
        let id = self.peek_next_id();
        let entry = Entry::validated(id, name, amount, date)?;
        self.ledger.entries_mut(category).push(entry.clone());
        if let Err(err) = self.persist() {
            self.ledger.entries_mut(category).pop();
            return Err(err);
        }
        self.last_id = id;
        debug!(%category, id, "entry added");
        Ok(entry)
    }

    /// Removes every entry with `id` from `category`, then persists. Stored
    /// blobs may carry duplicate ids, so all matches go and all are returned.
    /// A missing id is not an error; the ledger is still written.
    pub fn remove_entry(&mut self, category: EntryCategory, id: EntryId) -> Result<Vec<Entry>> {
        let entries = self.ledger.entries_mut(category);
        let previous = std::mem::take(entries);
        *entries = previous
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        if let Err(err) = self.persist() {
            *self.ledger.entries_mut(category) = previous;
            return Err(err);
        }
        let removed: Vec<Entry> = previous
            .into_iter()
            .filter(|entry| entry.id == id)
            .collect();
        match removed.len() {
            0 => debug!(%category, id, "no entry with that id, nothing removed"),
            count => debug!(%category, id, count, "entries removed"),
        }
        Ok(removed)
    }

    /// Next id: the clock's millisecond timestamp, bumped past every id issued so far.
    fn peek_next_id(&self) -> EntryId {
        self.clock
            .timestamp_millis()
            .max(self.last_id.saturating_add(1))
    }

    fn persist(&self) -> Result<()> {
        let json = encode_ledger(&self.ledger)?;
        self.storage.write(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::errors::ValidationError;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    const KEY: &str = "financeData";

    fn clock() -> Box<FixedClock> {
        Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()))
    }

    fn open(storage: &MemoryStore) -> LedgerStore {
        LedgerStore::open(Box::new(storage.clone()), KEY, clock())
    }

    struct FailingStore;

    impl BlobStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(LedgerError::Persistence("disk full".into()))
        }
    }

    #[test]
    fn ids_stay_unique_when_clock_does_not_advance() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        let first = store
            .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
            .unwrap();
        let second = store
            .add_entry(EntryCategory::Income, "Bonus", 200.0, "2025-01-20")
            .unwrap();
        assert_eq!(first.id, 1_736_899_200_000);
        assert_eq!(second.id, first.id + 1);
    }

    #[test]
    fn every_mutation_writes_once() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        let entry = store
            .add_entry(EntryCategory::FixedExpenses, "Rent", 800.0, "2025-01-05")
            .unwrap();
        assert_eq!(storage.write_count(), 1);
        store
            .remove_entry(EntryCategory::FixedExpenses, entry.id)
            .unwrap();
        assert_eq!(storage.write_count(), 2);
        store
            .remove_entry(EntryCategory::FixedExpenses, entry.id)
            .unwrap();
        assert_eq!(storage.write_count(), 3);
    }

    #[test]
    fn rejected_entries_are_not_persisted() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        let err = store
            .add_entry(EntryCategory::Income, "", 10.0, "2025-01-01")
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::EmptyName)
        ));
        assert!(store.snapshot().is_empty());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn failed_write_rolls_back_add_and_remove() {
        let mut store = LedgerStore::open(Box::new(FailingStore), KEY, clock());
        let err = store
            .add_entry(EntryCategory::Income, "Salary", 10.0, "2025-01-01")
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert!(store.snapshot().is_empty());

        let seeded = Entry::validated(9, "Rent", 50.0, "2025-01-01").unwrap();
        store.ledger.fixed_expenses.push(seeded.clone());
        assert!(store
            .remove_entry(EntryCategory::FixedExpenses, 9)
            .is_err());
        assert_eq!(store.snapshot().fixed_expenses, vec![seeded]);
    }

    #[test]
    fn remove_drops_every_entry_sharing_the_id() {
        let blob = r#"{
            "income": [
                {"id": 5, "name": "Salary", "amount": 1000.0, "date": "2025-01-05"},
                {"id": 6, "name": "Bonus", "amount": 200.0, "date": "2025-01-06"},
                {"id": 5, "name": "Refund", "amount": 50.0, "date": "2025-01-07"}
            ],
            "fixedExpenses": [],
            "variableExpenses": []
        }"#;
        let storage = MemoryStore::with_blob(KEY, blob);
        let mut store = open(&storage);

        let removed = store.remove_entry(EntryCategory::Income, 5).unwrap();
        let removed: Vec<_> = removed.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(removed, ["Salary", "Refund"]);

        let left: Vec<_> = open(&storage)
            .snapshot()
            .income
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        assert_eq!(left, ["Bonus"]);
    }

    #[test]
    fn failed_write_restores_duplicates_in_place() {
        let mut store = LedgerStore::open(Box::new(FailingStore), KEY, clock());
        let first = Entry::validated(5, "Salary", 1000.0, "2025-01-05").unwrap();
        let middle = Entry::validated(6, "Bonus", 200.0, "2025-01-06").unwrap();
        let last = Entry::validated(5, "Refund", 50.0, "2025-01-07").unwrap();
        store.ledger.income = vec![first, middle, last];
        let before = store.snapshot().clone();

        assert!(store.remove_entry(EntryCategory::Income, 5).is_err());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn reload_restores_last_issued_id() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        let entry = store
            .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
            .unwrap();

        let mut reopened = open(&storage);
        let next = reopened
            .add_entry(EntryCategory::Income, "Bonus", 10.0, "2025-01-16")
            .unwrap();
        assert!(next.id > entry.id);
    }

    #[test]
    fn corrupt_blob_degrades_to_empty_ledger() {
        let storage = MemoryStore::with_blob(KEY, "{not json");
        let store = open(&storage);
        assert!(store.snapshot().is_empty());

        let wrong_shape = MemoryStore::with_blob(KEY, r#"{"income": 5}"#);
        assert!(open(&wrong_shape).snapshot().is_empty());
    }

    #[test]
    fn switch_key_loads_the_other_blob() {
        let storage = MemoryStore::new();
        let mut store = open(&storage);
        store
            .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
            .unwrap();

        assert!(store.switch_key("other").is_empty());
        assert_eq!(store.key(), "other");
        assert_eq!(store.switch_key(KEY).income.len(), 1);
    }
}
