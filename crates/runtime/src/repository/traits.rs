//! Repository contract for saving and loading progress.

use skill_core::SaveData;

use super::{RepositoryError, Result};

/// Slot-addressed storage for [`SaveData`].
pub trait SaveRepository {
    /// Save progress into `slot`, replacing what was there.
    fn save(&self, slot: &str, data: &SaveData) -> Result<()>;

    /// Load the progress stored in `slot`.
    fn load(&self, slot: &str) -> Result<Option<SaveData>>;

    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all occupied slots, sorted.
    fn list_slots(&self) -> Result<Vec<String>>;
}

/// Slot names double as file stems, so they are restricted to a safe alphabet.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}
