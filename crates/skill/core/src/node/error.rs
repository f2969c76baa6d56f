//! Node progression errors.

use crate::error::{CoreError, ErrorSeverity};

use super::NodeKey;

/// The first requirement found not to hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnmetRequirement {
    #[error("prerequisite '{0}' is not obtained")]
    Node(NodeKey),

    #[error("player level {current} is below {required}")]
    PlayerLevel { required: u32, current: u32 },

    #[error("{current} points spent in graph, {required} required")]
    PointsSpent { required: u32, current: u32 },
}

/// Errors raised by upgrade, downgrade and deplete operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeError {
    #[error("node '{key}' needs {required} points, {available} available")]
    InsufficientPoints {
        key: NodeKey,
        required: u32,
        available: u32,
    },

    #[error("node '{key}' is locked: {unmet}")]
    PrerequisiteNotMet { key: NodeKey, unmet: UnmetRequirement },

    #[error("node '{key}' cannot be downgraded")]
    NotDowngradable { key: NodeKey },

    #[error("node '{key}' is not obtained")]
    NotObtained { key: NodeKey },

    #[error("node '{key}' is already at max level {max_level}")]
    MaxLevelReached { key: NodeKey, max_level: u32 },

    #[error("node '{key}' still has obtained dependents: {dependents:?}")]
    DependentsObtained {
        key: NodeKey,
        dependents: Vec<NodeKey>,
    },

    #[error("unknown node '{0}'")]
    UnknownNode(NodeKey),
}

impl CoreError for NodeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            NodeError::UnknownNode(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            NodeError::InsufficientPoints { .. } => "NODE_INSUFFICIENT_POINTS",
            NodeError::PrerequisiteNotMet { .. } => "NODE_PREREQUISITE_NOT_MET",
            NodeError::NotDowngradable { .. } => "NODE_NOT_DOWNGRADABLE",
            NodeError::NotObtained { .. } => "NODE_NOT_OBTAINED",
            NodeError::MaxLevelReached { .. } => "NODE_MAX_LEVEL_REACHED",
            NodeError::DependentsObtained { .. } => "NODE_DEPENDENTS_OBTAINED",
            NodeError::UnknownNode(_) => "NODE_UNKNOWN",
        }
    }
}
