//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use skill_core::SaveData;

use super::{RepositoryError, Result, SaveRepository, validate_slot};

const EXTENSION: &str = "sav";

/// Stores each slot as `{slot}.sav` in bincode format.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-save leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file backing `slot`.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", slot, EXTENSION))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, data: &SaveData) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("sav.tmp");

        let bytes =
            bincode::serialize(data).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved '{}' to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let data: SaveData = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded '{}' from {}", slot, path.display());

        Ok(Some(data))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted '{}'", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some(EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_slot(stem).is_ok()
            {
                slots.push(stem.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
