//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use skill_core::SkillConfig;

/// Runtime configuration shared across the orchestrator, clock and saves.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub skill: SkillConfig,
    /// Length of one simulation tick.
    pub fixed_step: Duration,
    /// Catch-up limit; frame time beyond this many steps is dropped.
    pub max_steps_per_frame: u32,
    pub save_dir: PathBuf,
    /// Save to [`Self::autosave_slot`] whenever a session is applied.
    pub autosave_on_apply: bool,
    pub autosave_slot: String,
}

impl RuntimeConfig {
    pub const DEFAULT_FIXED_STEP: Duration = Duration::from_millis(50);
    pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 8;
    pub const DEFAULT_AUTOSAVE_SLOT: &'static str = "autosave";

    /// Platform data directory for saves.
    ///
    /// - Linux: `~/.local/share/skilltree/saves`
    /// - macOS: `~/Library/Application Support/skilltree/saves`
    /// - Windows: `%APPDATA%\skilltree\saves`
    /// - Fallback: `./save_data/saves`
    pub fn default_save_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "skilltree")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
            .join("saves")
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            skill: SkillConfig::default(),
            fixed_step: Self::DEFAULT_FIXED_STEP,
            max_steps_per_frame: Self::DEFAULT_MAX_STEPS_PER_FRAME,
            save_dir: Self::default_save_dir(),
            autosave_on_apply: true,
            autosave_slot: Self::DEFAULT_AUTOSAVE_SLOT.to_string(),
        }
    }
}
