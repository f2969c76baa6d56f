//! Graph construction and lookup errors.

use crate::config::SkillConfig;
use crate::error::{CoreError, ErrorSeverity};
use crate::node::NodeKey;

use super::SlotIndex;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphError {
    #[error("grid {width}x{height} is empty or too large")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("slot {slot} is outside the grid of {cells} cells")]
    SlotIndexOutOfRange { slot: SlotIndex, cells: usize },

    #[error("coordinates ({x}, {y}) are outside the {width}x{height} grid")]
    CoordinatesOutOfRange {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    #[error("slot {slot} already holds '{existing}', cannot place '{key}'")]
    SlotOccupied {
        slot: SlotIndex,
        existing: NodeKey,
        key: NodeKey,
    },

    #[error("node key '{0}' is defined twice")]
    DuplicateKey(NodeKey),

    #[error("node '{key}' requires unknown node '{prerequisite}'")]
    UnknownPrerequisite { key: NodeKey, prerequisite: NodeKey },

    #[error("prerequisite cycle through node '{0}'")]
    CyclicPrerequisite(NodeKey),

    #[error("node '{0}' max level must be between 1 and {max}", max = SkillConfig::MAX_NODE_LEVEL)]
    InvalidMaxLevel(NodeKey),

    #[error("node '{key}' level {level} costs no points")]
    ZeroCost { key: NodeKey, level: u32 },

    #[error("connection touches empty slot {0}")]
    EmptySlot(SlotIndex),

    #[error("connection from slot {0} to itself")]
    SelfConnection(SlotIndex),
}

impl CoreError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GraphError::InvalidDimensions { .. } => "GRAPH_INVALID_DIMENSIONS",
            GraphError::SlotIndexOutOfRange { .. } => "GRAPH_SLOT_INDEX_OUT_OF_RANGE",
            GraphError::CoordinatesOutOfRange { .. } => "GRAPH_COORDINATES_OUT_OF_RANGE",
            GraphError::SlotOccupied { .. } => "GRAPH_SLOT_OCCUPIED",
            GraphError::DuplicateKey(_) => "GRAPH_DUPLICATE_KEY",
            GraphError::UnknownPrerequisite { .. } => "GRAPH_UNKNOWN_PREREQUISITE",
            GraphError::CyclicPrerequisite(_) => "GRAPH_CYCLIC_PREREQUISITE",
            GraphError::InvalidMaxLevel(_) => "GRAPH_INVALID_MAX_LEVEL",
            GraphError::ZeroCost { .. } => "GRAPH_ZERO_COST",
            GraphError::EmptySlot(_) => "GRAPH_EMPTY_SLOT",
            GraphError::SelfConnection(_) => "GRAPH_SELF_CONNECTION",
        }
    }
}
