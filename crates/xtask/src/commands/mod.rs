//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod list_saves;
mod read_save;
mod simulate;
mod validate;

pub use clean::Clean;
pub use list_saves::ListSaves;
pub use read_save::ReadSave;
pub use simulate::Simulate;
pub use validate::Validate;
