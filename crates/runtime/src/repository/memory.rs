use std::collections::HashMap;
use std::sync::RwLock;

use skill_core::SaveData;

use super::{RepositoryError, Result, SaveRepository, validate_slot};

/// In-memory implementation of SaveRepository
#[derive(Debug, Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<HashMap<String, SaveData>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, data: &SaveData) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_string(), data.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        validate_slot(slot)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = slots.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
