//! File-based KeyValueStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::memory::DEFAULT_QUOTA_BYTES;
use super::{KeyValueStore, Result, StorageError};

const VALUE_SUFFIX: &str = ".value";

/// File-based implementation of KeyValueStore.
///
/// Each key lives in its own file inside `base_dir`.
///
/// # File Format
///
/// Values are stored as `{key}.value` holding the raw text. Key bytes
/// outside `[A-Za-z0-9_-]` are percent-encoded so any key maps to a safe
/// file name. Writes go to a temp file first and are renamed into place,
/// so a failed write leaves the previous value intact.
pub struct FileStore {
    base_dir: PathBuf,
    quota: usize,
}

impl FileStore {
    /// Create a new file store, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_quota(base_dir, DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(base_dir: impl AsRef<Path>, quota: usize) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, quota })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}{}", encode_key(key), VALUE_SUFFIX))
    }

    /// Bytes `key` occupies now, from file metadata; 0 when absent.
    fn stored_len(&self, key: &str) -> Result<usize> {
        match fs::metadata(self.value_path(key)) {
            Ok(meta) => Ok(key.len() + meta.len() as usize),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        tracing::trace!("Loaded '{}' from {}", key, path.display());
        Ok(Some(text))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let previous = self.stored_len(key)?;
        let needed = self.usage()? - previous + key.len() + value.len();
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                quota: self.quota,
            });
        }

        let path = self.value_path(key);
        let temp_path = path.with_extension("value.tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved '{}' to {}", key, path.display());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.value_path(key);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)?;
        tracing::debug!("Removed '{}'", key);
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(encoded) = filename.strip_suffix(VALUE_SUFFIX)
                && let Some(key) = decode_key(encoded)
            {
                keys.push(key);
            }
        }

        keys.sort_unstable();
        Ok(keys)
    }

    /// Sums file sizes without reading any value.
    fn usage(&self) -> Result<usize> {
        let mut total = 0;

        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(encoded) = filename.strip_suffix(VALUE_SUFFIX)
                && let Some(key) = decode_key(encoded)
            {
                total += key.len() + entry.metadata()?.len() as usize;
            }
        }

        Ok(total)
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
