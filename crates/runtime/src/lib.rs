//! Host integration for the skill-tree core.
//!
//! This crate wires the deterministic `skill-core` context to the outside
//! world: a fixed-step clock that turns variable frame times into simulation
//! ticks, save repositories, and a queued event stream for the presentation
//! layer. Consumers embed [`SkillRuntime`] and call
//! [`SkillRuntime::advance`] once per frame.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`clock`] converts frame time into fixed steps
//! - [`events`] queues core notifications by topic
//! - [`repository`] persists save data
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod repository;
pub mod runtime;

pub use clock::FixedStepClock;
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{RuntimeEvent, Topic};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use runtime::{RuntimeBuilder, SkillRuntime};
