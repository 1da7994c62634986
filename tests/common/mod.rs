#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use finance_tracker::{
    config::ConfigManager,
    core::{time::FixedClock, utils::PathResolver, LedgerStore},
    storage::{BlobStore, JsonFileStore, DEFAULT_STORAGE_KEY},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh base directory that survives until the test binary exits.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Isolated file-backed storage and config rooted in a unique directory.
pub fn setup_test_env() -> (JsonFileStore, ConfigManager) {
    let base = temp_base();
    let storage = JsonFileStore::new(PathResolver::data_dir_in(&base)).expect("json store");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (storage, config_manager)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Store under the default key with the clock frozen on 2025-01-15.
pub fn open_store(storage: impl BlobStore + 'static) -> LedgerStore {
    LedgerStore::open(
        Box::new(storage),
        DEFAULT_STORAGE_KEY,
        Box::new(FixedClock::on(date(2025, 1, 15))),
    )
}
