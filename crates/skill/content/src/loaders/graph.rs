//! Skill graph loader.
//!
//! A graph file deserializes directly into [`GraphDefinition`]; structural
//! validation (slots, prerequisites, cycles) happens when the graph is built.

use std::path::Path;

use skill_core::{GraphDefinition, SkillGraph};

use crate::loaders::{LoadResult, read_file};

/// Loader for skill graph definitions from RON files.
pub struct GraphLoader;

impl GraphLoader {
    pub fn load(path: &Path) -> LoadResult<GraphDefinition> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GraphDefinition> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse graph RON: {}", e))
    }

    /// Parses and validates, returning a ready graph.
    pub fn build(path: &Path) -> LoadResult<SkillGraph> {
        let definition = Self::load(path)?;
        let id = definition.id.clone();
        let graph = SkillGraph::from_definition(definition)
            .map_err(|e| anyhow::anyhow!("Invalid skill graph '{}': {}", id, e))?;
        tracing::debug!("Loaded skill graph '{}' from {}", id, path.display());
        Ok(graph)
    }
}
