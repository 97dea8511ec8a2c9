//! JSON file storage: one `<key>.json` file per key under a base directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::traits::{Storage, validate_key};
use crate::error::Result;

/// File-backed storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    base_path: PathBuf,
}

impl JsonFileStorage {
    /// Open storage at the given path, creating the directory if needed.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        tracing::debug!(path = %base_path.display(), "Opened file storage");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.key_path(key);
        // Write beside the target, then rename over it.
        let tmp = self.base_path.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (JsonFileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_write_and_read() {
        let (storage, _temp) = create_test_storage();
        storage.write("learningData", "{}").unwrap();
        assert_eq!(storage.read("learningData").unwrap(), Some("{}".to_string()));
        assert!(storage.base_path().join("learningData.json").exists());
    }

    #[test]
    fn test_read_missing() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.read("nothing").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let (storage, _temp) = create_test_storage();
        storage.write("k", "one").unwrap();
        storage.write("k", "two").unwrap();
        assert_eq!(storage.read("k").unwrap(), Some("two".to_string()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (storage, _temp) = create_test_storage();
        storage.write("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.write("../k", "v").is_err());
        assert!(storage.read("a/b").is_err());
    }

    #[test]
    fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = JsonFileStorage::new(temp_dir.path()).unwrap();
            storage.write("mentalModels", "[]").unwrap();
        }
        {
            let storage = JsonFileStorage::new(temp_dir.path()).unwrap();
            assert_eq!(storage.read("mentalModels").unwrap(), Some("[]".to_string()));
        }
    }

    #[test]
    fn test_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let storage = JsonFileStorage::new(&nested).unwrap();
        storage.write("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }
}
