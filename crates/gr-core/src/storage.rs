use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::character::Character;
use crate::error::CoreResult;

/// The fixed key the character blob is stored under.
pub const STORAGE_KEY: &str = "mage-spell-caster-data";

/// A place blobs can be loaded from and saved to by key.
pub trait Storage {
    /// Fetch the blob stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> CoreResult<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &str) -> CoreResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, blob: &str) -> CoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), blob)?;
        Ok(())
    }
}

/// In-process storage, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> CoreResult<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Load the character, falling back to defaults if nothing is stored or
/// the storage fails.
pub fn load_character(storage: &impl Storage) -> Character {
    match storage.load(STORAGE_KEY) {
        Ok(Some(blob)) => Character::from_blob(&blob),
        Ok(None) => {
            tracing::debug!("no saved character, using defaults");
            Character::default()
        }
        Err(e) => {
            tracing::warn!("could not load character, using defaults: {e}");
            Character::default()
        }
    }
}

/// Save the character under the fixed key.
pub fn save_character(storage: &impl Storage, character: &Character) -> CoreResult<()> {
    storage.save(STORAGE_KEY, &character.to_blob()?)?;
    tracing::debug!("character saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcanum::Arcanum;
    use tempfile::TempDir;

    #[test]
    fn memory_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(load_character(&storage), Character::default());

        let mut c = Character::default();
        c.set_gnosis(4);
        c.set_rating(Arcanum::Mind, 2);
        save_character(&storage, &c).unwrap();
        assert_eq!(load_character(&storage), c);
    }

    #[test]
    fn file_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.load(STORAGE_KEY).unwrap(), None);

        let mut c = Character::default();
        c.set_gnosis(9);
        save_character(&storage, &c).unwrap();

        assert!(storage.path_for(STORAGE_KEY).ends_with("mage-spell-caster-data.json"));
        assert_eq!(load_character(&storage), c);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.save(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(load_character(&storage), Character::default());
    }
}
