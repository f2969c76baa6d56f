use std::time::Duration;

use crate::error::{CoreError, ErrorSeverity};
use crate::node::NodeKey;
use crate::stats::StatError;

use super::{UseId, UsePhase};

/// Errors raised when starting or cancelling a skill use.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseError {
    #[error("skill '{0}' is not obtained")]
    PrerequisitesNotObtained(NodeKey),

    #[error("skill '{0}' is passive and cannot be used")]
    PassiveSkill(NodeKey),

    #[error("skill '{key}' is on cooldown for {remaining:?}")]
    OnCooldown { key: NodeKey, remaining: Duration },

    #[error("skill '{key}' costs unknown stat '{stat}'")]
    UnknownStat { key: NodeKey, stat: String },

    #[error("skill '{key}' needs {required} {stat}, {available} available")]
    InsufficientResource {
        key: NodeKey,
        stat: String,
        required: i32,
        available: i32,
    },

    #[error("use {use_id} is {phase} and can no longer be cancelled")]
    NotCancellable { use_id: UseId, phase: UsePhase },

    #[error("no in-flight use {0}")]
    UnknownUse(UseId),

    #[error("unknown skill '{0}'")]
    UnknownNode(NodeKey),

    #[error(transparent)]
    Stat(#[from] StatError),
}

impl CoreError for UseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            UseError::UnknownStat { .. } | UseError::UnknownNode(_) => ErrorSeverity::Validation,
            UseError::Stat(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UseError::PrerequisitesNotObtained(_) => "USE_PREREQUISITES_NOT_OBTAINED",
            UseError::PassiveSkill(_) => "USE_PASSIVE_SKILL",
            UseError::OnCooldown { .. } => "USE_ON_COOLDOWN",
            UseError::UnknownStat { .. } => "USE_UNKNOWN_STAT",
            UseError::InsufficientResource { .. } => "USE_INSUFFICIENT_RESOURCE",
            UseError::NotCancellable { .. } => "USE_NOT_CANCELLABLE",
            UseError::UnknownUse(_) => "USE_UNKNOWN_USE",
            UseError::UnknownNode(_) => "USE_UNKNOWN_NODE",
            UseError::Stat(_) => "USE_STAT",
        }
    }
}
