//! Content factory for loading skill content from a data directory.

use std::path::{Path, PathBuf};

use skill_core::{GraphDefinition, SkillConfig, StatRegistry};

use crate::loaders::{ConfigLoader, GraphLoader, LoadResult, StatLoader};

/// Content factory that loads all skill content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── stats.ron
/// └── graphs/
///     ├── warrior.ron
///     └── mage.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tree configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<SkillConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the stat catalog from `stats.ron` into a fresh registry.
    pub fn load_stats(&self) -> LoadResult<StatRegistry> {
        StatLoader::load(&self.data_dir.join("stats.ron"))?.into_registry()
    }

    /// Load a graph definition from `graphs/{graph_id}.ron`.
    pub fn load_graph(&self, graph_id: &str) -> LoadResult<GraphDefinition> {
        let definition = GraphLoader::load(&self.graph_path(graph_id))?;
        if definition.id.as_str() != graph_id {
            anyhow::bail!(
                "Graph file {}.ron declares id '{}'",
                graph_id,
                definition.id
            );
        }
        Ok(definition)
    }

    /// Ids of every graph file under `graphs/`, sorted.
    pub fn list_graphs(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("graphs");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn graph_path(&self, graph_id: &str) -> PathBuf {
        self.data_dir.join("graphs").join(format!("{}.ron", graph_id))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
