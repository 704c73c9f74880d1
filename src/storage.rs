use crate::errors::{JournalError, Result};
use std::{
    collections::BTreeMap,
    collections::hash_map::DefaultHasher,
    fs,
    hash::{Hash, Hasher},
    io::ErrorKind,
    path::PathBuf,
};
use tracing::error;

/// Synchronous string key-value store, the shape of a browser's local
/// storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;

    /// Opaque marker that changes whenever the stored content changes,
    /// including writes made by someone else. `None` when unsupported or
    /// when nothing is stored.
    fn revision(&self) -> Result<Option<u64>> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    revision: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.revision += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.revision += 1;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn revision(&self) -> Result<Option<u64>> {
        Ok(Some(self.revision))
    }
}

/// All keys live in one JSON object on disk. The file is re-read on every
/// call so writes from other processes are visible.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                error!("failed to read store file {}: {err}", self.path.display());
                Err(err.into())
            }
        }
    }

    fn parse_entries(&self) -> Result<BTreeMap<String, String>> {
        let Some(bytes) = self.read_bytes()? else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse store file {}: {err}", self.path.display());
            JournalError::Serialization(err)
        })
    }

    // Reads treat an unparseable file as empty.
    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        match self.parse_entries() {
            Err(JournalError::Serialization(_)) => Ok(BTreeMap::new()),
            other => other,
        }
    }

    fn persist_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_vec_pretty(entries)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.parse_entries()?;
        entries.insert(key.to_string(), value);
        self.persist_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.parse_entries()?;
        if entries.remove(key).is_some() {
            self.persist_entries(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load_entries()?.into_keys().collect())
    }

    fn revision(&self) -> Result<Option<u64>> {
        Ok(self.read_bytes()?.map(|bytes| {
            let mut hasher = DefaultHasher::new();
            bytes.hash(&mut hasher);
            hasher.finish()
        }))
    }
}
