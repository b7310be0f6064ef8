use std::path::{Path, PathBuf};

use crate::error::Result;

/// String key-value persistence surface. Values are opaque JSON blobs;
/// writes are whole-value, last-write-wins.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key store under a data directory: `<dir>/<key>.json`.
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal (`session`, `trips-<id>`) but sanitize anyway
        // so a hostile user id cannot escape the data directory.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[cfg(test)]
pub struct MemoryKv {
    map: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryKv {
    pub fn new() -> Self {
        Self { map: std::cell::RefCell::new(std::collections::HashMap::new()) }
    }
}

#[cfg(test)]
impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kv_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path());
        assert!(kv.get("trips-u1").is_none());
        kv.set("trips-u1", "[]").unwrap();
        assert_eq!(kv.get("trips-u1").as_deref(), Some("[]"));
        kv.set("trips-u1", "[1]").unwrap();
        assert_eq!(kv.get("trips-u1").as_deref(), Some("[1]"));
        kv.remove("trips-u1").unwrap();
        assert!(kv.get("trips-u1").is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path());
        kv.remove("nope").unwrap();
    }

    #[test]
    fn test_keys_are_sanitized_to_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path());
        kv.set("../evil", "x").unwrap();
        assert!(dir.path().join("___evil.json").exists());
        assert_eq!(kv.get("../evil").as_deref(), Some("x"));
    }

    #[test]
    fn test_creates_data_dir_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("data");
        let kv = FileKv::new(&nested);
        kv.set("session", "{}").unwrap();
        assert!(nested.join("session.json").exists());
    }
}
