//! Static graph layout: identity, grid size, nodes and connections.

use core::fmt;

use crate::node::SkillDefinition;

use super::connection::SkillConnection;

/// Identifier of a skill graph, used to match save data to its graph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GraphId(String);

impl GraphId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GraphId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GraphId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row-major cell index in the graph grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SlotIndex(pub u16);

impl SlotIndex {
    pub const fn from_coords(x: u16, y: u16, width: u16) -> Self {
        Self(y * width + x)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Everything needed to build a [`super::SkillGraph`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphDefinition {
    pub id: GraphId,
    pub width: u16,
    pub height: u16,
    pub nodes: Vec<SkillDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Vec<SkillConnection>,
}

impl GraphDefinition {
    pub fn new(id: impl Into<GraphId>, width: u16, height: u16) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: SkillDefinition) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_connection(mut self, connection: SkillConnection) -> Self {
        self.connections.push(connection);
        self
    }
}
