//! Persistence for skill-tree progress.
//!
//! Repositories store [`skill_core::SaveData`] under named slots. The core
//! only defines the save shape; these types decide where it lives.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::{SaveRepository, validate_slot};
