use crate::{abstract_trait::SessionStoreTrait, errors::StoreError};
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, error, warn};

/// Session slots kept in a small JSON document on disk.
///
/// The whole document is rewritten on every change through a temporary file
/// and a rename, so a crash never leaves a half-written session behind.
/// Reads only ever see what reached the disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Ignoring unreadable session file {}: {:?}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Opened session file {}", path.display());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl SessionStoreTrait for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());

        match self.flush(&next) {
            Ok(()) => {
                *entries = next;
                debug!("Stored session key '{}'", key);
                true
            }
            Err(e) => {
                error!(
                    "Failed to write session key '{}' to {}: {:?}",
                    key,
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            return true;
        }

        let mut next = entries.clone();
        next.remove(key);

        match self.flush(&next) {
            Ok(()) => {
                *entries = next;
                debug!("Deleted session key '{}'", key);
                true
            }
            Err(e) => {
                error!(
                    "Failed to delete session key '{}' from {}: {:?}",
                    key,
                    self.path.display(),
                    e
                );
                false
            }
        }
    }
}
