//! File-backed key-value storage

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{KeyValueStore, PersistenceError};

/// Stores each key as `<key>.json` inside a data directory.
///
/// The directory is created on first write. Writes land in a temporary file
/// that is renamed over the previous value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the values are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a key is stored at.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidKey`] for empty keys and keys that
    /// would escape the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let invalid = key.is_empty()
            || key.contains(['/', '\\'])
            || key.starts_with('.')
            || key.contains("..");

        if invalid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote slot");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert!(store.get("cart")?.is_none());

        Ok(())
    }

    #[test]
    fn set_creates_directory_and_replaces_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path().join("nested").join("data"));

        store.set("cart", "[]")?;
        store.set("cart", r#"[{"x":1}]"#)?;

        assert_eq!(store.get("cart")?.as_deref(), Some(r#"[{"x":1}]"#));
        assert!(store.dir().join("cart.json").is_file());
        assert!(!store.dir().join("cart.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn rejects_keys_outside_directory() {
        let store = FileStore::new("/tmp/storefront");

        for key in ["", "../cart", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(store.path_for(key), Err(PersistenceError::InvalidKey(_))),
                "expected {key:?} to be rejected"
            );
        }
    }

    #[test]
    fn unreadable_path_is_an_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("cart.json"))?;

        let store = FileStore::new(dir.path());

        assert!(matches!(store.get("cart"), Err(PersistenceError::Io(_))));

        Ok(())
    }
}
