//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for data directories.

use std::path::PathBuf;

/// Environment variable overriding the content directory.
const CONTENT_DIR_ENV: &str = "SKILLTREE_DATA_DIR";

/// Get the platform-specific save directory
///
/// Matches the runtime's default so saves written by a host are found here:
/// - macOS: `~/Library/Application Support/skilltree/saves`
/// - Linux: `~/.local/share/skilltree/saves` (or `$XDG_DATA_HOME/skilltree/saves`)
/// - Windows: `%APPDATA%\skilltree\saves`
/// - Fallback: `./save_data/saves`
pub fn save_dir() -> PathBuf {
    runtime::RuntimeConfig::default_save_dir()
}

/// Content directory from `SKILLTREE_DATA_DIR`, defaulting to `./data`.
pub fn content_dir() -> PathBuf {
    std::env::var_os(CONTENT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}
