use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::errors::{LedgerError, Result};

use super::BlobStore;

#[derive(Debug, Default)]
struct Inner {
    blobs: HashMap<String, String>,
    writes: usize,
}

/// In-process blob store. Clones share the same contents and write counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `value` under `key`, without counting a write.
    pub fn with_blob(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.blobs.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.blobs.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        inner.blobs.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}
