//! Stat catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{StatDefinition, StatRegistry};

use crate::loaders::{LoadResult, read_file};

/// Stat catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatCatalog {
    pub stats: Vec<StatDefinition>,
}

impl StatCatalog {
    /// Builds a registry, failing on the first invalid definition.
    pub fn into_registry(self) -> LoadResult<StatRegistry> {
        StatRegistry::from_definitions(self.stats)
            .map_err(|e| anyhow::anyhow!("Invalid stat catalog: {}", e))
    }
}

/// Loader for stat catalogs from RON files.
pub struct StatLoader;

impl StatLoader {
    pub fn load(path: &Path) -> LoadResult<StatCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StatCatalog> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse stat catalog RON: {}", e))
    }
}
