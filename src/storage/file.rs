//! Directory-backed storage: one file per key.
//!
//! Writes go to a temp file that is renamed over the target, under an
//! exclusive advisory lock on a sidecar `.lock` file, so concurrent
//! processes never read a half-written value.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use scopeguard::ScopeGuard;

use super::{KeyValueStorage, StorageError};

const LOCK_FILE: &str = ".lock";
/// Keeps every stem clear of reserved device names (`CON`, `NUL`, ...).
const KEY_PREFIX: &str = "kv-";

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Io {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", KEY_PREFIX, encode_key(key)))
    }

    fn lock(&self, exclusive: bool) -> Result<File, StorageError> {
        let path = self.dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StorageError::Io {
                path: path.clone(),
                source: e,
            })?;
        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|e| StorageError::Lock { path, source: e })?;
        // Released when the handle is dropped.
        Ok(file)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        let _lock = self.lock(false)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension(format!("json.tmp.{}", std::process::id()));
        let _lock = self.lock(true)?;

        let tmp = scopeguard::guard(tmp_path, |tmp| {
            let _ = fs::remove_file(tmp);
        });
        write_synced(&tmp, value).map_err(|e| StorageError::Io {
            path: tmp.to_path_buf(),
            source: e,
        })?;
        fs::rename(&*tmp, &path).map_err(|e| StorageError::Io {
            path: path.clone(),
            source: e,
        })?;
        // Renamed into place; nothing left to clean up.
        ScopeGuard::into_inner(tmp);
        tracing::trace!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let _lock = self.lock(true)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }
}

fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

/// Map an arbitrary key to a portable file stem.
///
/// `[a-z0-9_-]` pass through; every other byte becomes `%XX`. Uppercase is
/// escaped too, so keys differing only in case stay distinct on
/// case-insensitive filesystems.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn encode_key_escapes_separators() {
        assert_eq!(encode_key("@gomarket:products"), "%40gomarket%3Aproducts");
        assert_eq!(encode_key("plain_key-1"), "plain_key-1");
        assert_eq!(encode_key("../etc"), "%2E%2E%2Fetc");
    }

    #[test]
    fn keys_differing_in_case_map_to_distinct_files() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let upper = storage.path_for("@goMarket:products");
        let lower = storage.path_for("@gomarket:products");
        let upper_name = upper.file_name().unwrap().to_string_lossy().to_lowercase();
        let lower_name = lower.file_name().unwrap().to_string_lossy().to_lowercase();
        assert_ne!(upper_name, lower_name);

        storage.set("@goMarket:products", "upper").unwrap();
        storage.set("@gomarket:products", "lower").unwrap();
        assert_eq!(storage.get("@goMarket:products").unwrap().as_deref(), Some("upper"));
        assert_eq!(storage.get("@gomarket:products").unwrap().as_deref(), Some("lower"));
    }

    #[test]
    fn reserved_device_names_are_prefixed() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        for key in ["CON", "con", "nul", "COM1"] {
            let stem = storage.path_for(key);
            let stem = stem.file_stem().unwrap().to_string_lossy().into_owned();
            assert!(stem.starts_with(KEY_PREFIX), "{stem}");
        }
        assert_eq!(
            storage.path_for("CON").file_name().unwrap().to_string_lossy(),
            "kv-%43%4F%4E.json"
        );
    }

    #[test]
    fn set_then_get() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("@goMarket:products", "[]").unwrap();
        assert_eq!(
            storage.get("@goMarket:products").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("nothing").unwrap(), None);
    }

    #[test]
    fn set_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|name| !name.contains(".tmp.")));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn open_creates_nested_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert!(storage.dir().is_dir());
    }

    #[test]
    fn remove_deletes_value() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
