//! Persistence format for a tree's progress.
//!
//! The core defines the shape of a save, not the storage medium. Loading is
//! tolerant of data drift: unknown node keys are skipped and out-of-range
//! levels are clamped, field by field, instead of rejecting the whole save.

use std::collections::BTreeMap;

use crate::error::{CoreError, ErrorSeverity};
use crate::graph::{GraphId, SkillGraph};
use crate::node::NodeKey;
use crate::progression::Progression;

/// Serializable progress for one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveData {
    pub graph_id: GraphId,
    pub levels: BTreeMap<NodeKey, u32>,
    pub unspent_points: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_player_level"))]
    pub player_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u64,
}

#[cfg(feature = "serde")]
fn default_player_level() -> u32 {
    1
}

impl SaveData {
    pub fn capture(graph: &SkillGraph, progression: &Progression) -> Self {
        Self {
            graph_id: graph.id().clone(),
            levels: graph.level_map(),
            unspent_points: progression.unspent_points,
            player_level: progression.player_level,
            experience: progression.experience,
        }
    }

    pub fn progression(&self) -> Progression {
        Progression {
            player_level: self.player_level.max(1),
            experience: self.experience,
            unspent_points: self.unspent_points,
        }
    }

    /// Writes the saved levels into `graph`.
    ///
    /// Nodes missing from the save are set to level 0.
    pub fn restore(&self, graph: &mut SkillGraph) -> Result<LoadReport, LoadError> {
        if self.graph_id != *graph.id() {
            return Err(LoadError::GraphMismatch {
                expected: graph.id().clone(),
                found: self.graph_id.clone(),
            });
        }

        let mut report = LoadReport::default();
        for node in graph.nodes_mut() {
            let saved = self.levels.get(node.key()).copied().unwrap_or(0);
            let applied = node.set_level(saved);
            if applied != saved {
                tracing::warn!(
                    "Clamped '{}' from level {} to {}",
                    node.key(),
                    saved,
                    applied
                );
                report.clamped.push(node.key().clone());
            }
            if self.levels.contains_key(node.key()) {
                report.applied += 1;
            }
        }

        for key in self.levels.keys() {
            if !graph.contains(key.as_str()) {
                tracing::warn!("Ignoring unknown node '{}' in save for '{}'", key, self.graph_id);
                report.unknown_keys.push(key.clone());
            }
        }

        Ok(report)
    }
}

/// What a load did with each saved field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Saved levels that matched a node.
    pub applied: usize,
    /// Saved keys with no matching node.
    pub unknown_keys: Vec<NodeKey>,
    /// Nodes whose saved level was outside `[0, max_level]`.
    pub clamped: Vec<NodeKey>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_keys.is_empty() && self.clamped.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadError {
    #[error("save is for graph '{found}', expected '{expected}'")]
    GraphMismatch { expected: GraphId, found: GraphId },
}

impl CoreError for LoadError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            LoadError::GraphMismatch { .. } => "LOAD_GRAPH_MISMATCH",
        }
    }
}
