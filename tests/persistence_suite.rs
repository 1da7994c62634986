mod common;

use std::fs;

use common::{open_store, setup_test_env};
use finance_tracker::{
    core::ledger_store::{decode_ledger, encode_ledger},
    storage::{BlobStore, MemoryStore, DEFAULT_STORAGE_KEY},
    EntryCategory, LedgerError,
};
use serde_json::Value;

fn tmp_path_for(path: &std::path::Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    tmp
}

#[test]
fn file_store_round_trips_across_reopen() {
    let (storage, _config) = setup_test_env();
    let mut store = open_store(storage.clone());
    store
        .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
        .unwrap();
    store
        .add_entry(EntryCategory::FixedExpenses, "Rent", 800.0, "2025-01-05")
        .unwrap();
    store
        .add_entry(EntryCategory::VariableExpenses, "Cinema", 0.1 + 0.2, "2025-01-20")
        .unwrap();
    let before = store.snapshot().clone();

    let reopened = open_store(storage);
    assert_eq!(reopened.snapshot(), &before);
}

#[test]
fn blob_uses_camel_case_collections_and_iso_dates() {
    let (storage, _config) = setup_test_env();
    let mut store = open_store(storage.clone());
    store
        .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
        .unwrap();

    let raw = fs::read_to_string(storage.blob_path(DEFAULT_STORAGE_KEY)).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["income"][0]["name"], "Salary");
    assert_eq!(json["income"][0]["amount"], 1000.0);
    assert_eq!(json["income"][0]["date"], "2025-01-15");
    assert_eq!(json["income"][0]["id"], 1_736_899_200_000_i64);
    assert!(json["fixedExpenses"].as_array().unwrap().is_empty());
    assert!(json["variableExpenses"].as_array().unwrap().is_empty());
}

#[test]
fn blobs_with_integer_amounts_decode() {
    let raw = r#"{"income":[{"id":1736899200000,"name":"Salary","amount":1000,"date":"2025-01-15"}],"fixedExpenses":[],"variableExpenses":[]}"#;
    let ledger = decode_ledger(raw).unwrap();
    assert_eq!(ledger.income[0].amount, 1000.0);
    assert_eq!(decode_ledger(&encode_ledger(&ledger).unwrap()).unwrap(), ledger);
}

#[test]
fn corrupt_file_loads_empty_and_is_replaced_on_next_write() {
    let (storage, _config) = setup_test_env();
    fs::write(storage.blob_path(DEFAULT_STORAGE_KEY), "{\"income\": [").unwrap();

    let mut store = open_store(storage.clone());
    assert!(store.snapshot().is_empty());
    assert!(matches!(
        decode_ledger("{\"income\": ["),
        Err(LedgerError::CorruptBlob(_))
    ));

    store
        .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
        .unwrap();
    let raw = storage.read(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_ledger(&raw).unwrap().income.len(), 1);
}

#[test]
fn failed_write_keeps_previous_file_and_state() {
    let (storage, _config) = setup_test_env();
    let mut store = open_store(storage.clone());
    store
        .add_entry(EntryCategory::Income, "Salary", 1000.0, "2025-01-15")
        .unwrap();
    let path = storage.blob_path(DEFAULT_STORAGE_KEY);
    let original = fs::read_to_string(&path).unwrap();

    // A directory at the temp path makes the atomic write fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();
    let result = store.add_entry(EntryCategory::FixedExpenses, "Rent", 800.0, "2025-01-05");
    assert!(matches!(result, Err(LedgerError::Persistence(_))));

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(store.snapshot().fixed_expenses.is_empty());
    assert_eq!(store.snapshot().income.len(), 1);
}

#[test]
fn memory_store_reload_sees_every_mutation() {
    let storage = MemoryStore::new();
    let mut store = open_store(storage.clone());
    let rent = store
        .add_entry(EntryCategory::FixedExpenses, "Rent", 800.0, "2025-01-05")
        .unwrap();
    store
        .add_entry(EntryCategory::FixedExpenses, "Internet", 100.0, "2025-01-10")
        .unwrap();
    store
        .remove_entry(EntryCategory::FixedExpenses, rent.id)
        .unwrap();

    let reloaded = open_store(storage.clone());
    let names: Vec<_> = reloaded
        .snapshot()
        .fixed_expenses
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, ["Internet"]);
    assert_eq!(storage.write_count(), 3);
}
