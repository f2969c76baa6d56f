//! Data-driven skill content and its loaders.
//!
//! Skill graphs, stat catalogs and tree configuration are authored as data
//! files and deserialized straight into `skill-core` types:
//! - Skill graphs (RON, one file per graph)
//! - Stat catalogs (RON)
//! - Skill tree configuration (TOML)
//!
//! Content describes what exists; progress lives in save data and never here.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, GraphLoader, LoadResult, StatCatalog, StatLoader};
