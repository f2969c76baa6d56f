//! Unified error type surfaced by the runtime API.
//!
//! Wraps core rule violations and repository failures so clients can bubble
//! them up with consistent context.

use thiserror::Error;

use skill_core::{GraphError, LoadError, NodeError, SessionError, StatError, UseError};

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Use(#[from] UseError),

    #[error(transparent)]
    Stat(#[from] StatError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no save in slot '{0}'")]
    SaveNotFound(String),

    #[error("runtime requires a skill graph before building")]
    MissingGraph,

    #[error("failed to load content: {0}")]
    Content(String),
}
