use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::Result,
};

use super::BlobStore;

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const ESCAPE: char = '_';

/// Stores each key as `<dir>/<encoded key>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    /// Store rooted at the data directory under `base` (or the default base).
    pub fn in_base(base: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(base);
        Self::new(PathResolver::data_dir_in(&base))
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", canonical_name(key), BLOB_EXTENSION))
    }
}

impl BlobStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// File stem for `key`: ASCII letters, digits and `-` pass through, every other
/// byte becomes `_XX`. The mapping is injective, so distinct keys never share a file.
fn canonical_name(key: &str) -> String {
    if key.is_empty() {
        return ESCAPE.to_string();
    }
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => name.push(char::from(byte)),
            other => {
                name.push(ESCAPE);
                name.push_str(&format!("{other:02X}"));
            }
        }
    }
    name
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
