//! Deterministic skill-tree progression shared by the runtime and tools.
//!
//! `skill-core` defines the rules (stats, nodes, graphs, edit sessions and
//! timed skill execution) as pure, single-threaded APIs. All progression
//! state is owned by [`tree::SkillTree`], which publishes every change to its
//! observers; content loading, persistence media and frame timing live in
//! the crates that depend on the types re-exported here.
pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod node;
pub mod progression;
pub mod save;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod tree;

pub use config::{DowngradePolicy, SkillConfig};
pub use error::{CoreError, ErrorSeverity};
pub use events::{Observers, SkillEvent, SubscriptionId};
pub use graph::{
    ConnectionDirection, GraphDefinition, GraphDelta, GraphError, GraphId, NodeChange, NodeFields,
    NodeView, SkillConnection, SkillGraph, SlotIndex,
};
pub use node::{
    CostCurve, NodeError, NodeKey, NodeShape, NodeState, Requirements, ResourceCost,
    SkillDefinition, SkillKind, SkillNode, SkillTiming, StatModifier, UnmetRequirement,
};
pub use progression::{LevelCurve, LevelUp, Progression};
pub use save::{LoadError, LoadReport, SaveData};
pub use scheduler::{SkillScheduler, UseError, UseId, UsePhase, UsedSkill};
pub use session::{SessionError, SessionSnapshot, SkillSession};
pub use stats::{
    Bonus, BonusStack, Growth, Stat, StatBonuses, StatChange, StatDefinition, StatError,
    StatEvent, StatId, StatRegistry, StatSnapshot, Threshold,
};
pub use tree::SkillTree;
