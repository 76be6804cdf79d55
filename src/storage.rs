use crate::errors::StoreError;
use crate::models::Habit;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Whole-collection blob persistence.
///
/// `load` returns an empty collection when nothing was ever saved, and
/// `MalformedPersistedData` when the stored blob cannot be trusted. `save`
/// overwrites everything; there are no partial writes.
pub trait HabitPersistence {
    fn load(&self) -> Result<Vec<Habit>, StoreError>;
    fn save(&self, habits: &[Habit]) -> Result<(), StoreError>;
}

pub fn decode_habits(bytes: &[u8]) -> Result<Vec<Habit>, StoreError> {
    let mut habits: Vec<Habit> = serde_json::from_slice(bytes)
        .map_err(|err| StoreError::MalformedPersistedData(err.to_string()))?;

    let mut seen = HashSet::new();
    for habit in &mut habits {
        if !seen.insert(habit.id.clone()) {
            return Err(StoreError::MalformedPersistedData(format!(
                "duplicate habit id {}",
                habit.id
            )));
        }
        habit.normalize();
    }

    Ok(habits)
}

pub fn encode_habits(habits: &[Habit]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(habits)
        .map_err(|err| StoreError::Persist(std::io::Error::other(err)))
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HabitPersistence for JsonFileStore {
    fn load(&self) -> Result<Vec<Habit>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_habits(&bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, habits: &[Habit]) -> Result<(), StoreError> {
        let payload = encode_habits(habits)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-process blob, the same single-key shape as browser local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Mutex::new(Some(bytes.into())),
        }
    }

    pub fn blob(&self) -> Option<Vec<u8>> {
        self.blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl HabitPersistence for MemoryStore {
    fn load(&self) -> Result<Vec<Habit>, StoreError> {
        match self.blob() {
            Some(bytes) => decode_habits(&bytes),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, habits: &[Habit]) -> Result<(), StoreError> {
        let payload = encode_habits(habits)?;
        *self
            .blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(payload);
        Ok(())
    }
}

impl<P: HabitPersistence + ?Sized> HabitPersistence for &P {
    fn load(&self) -> Result<Vec<Habit>, StoreError> {
        (**self).load()
    }

    fn save(&self, habits: &[Habit]) -> Result<(), StoreError> {
        (**self).save(habits)
    }
}
