//! Stat system: named numeric attributes with bounds, growth and bonuses.
//!
//! ```text
//! [ StatDefinition ] --define--> [ StatRegistry ] --snapshot--> [ StatSnapshot ]
//!                                      |
//!                     effective(id, StatBonuses from obtained skills)
//! ```
//!
//! Mutations clamp into `[min, max]` and report bound crossings through
//! [`StatEvent`] observers, exactly once per crossing.

pub mod bonus;
pub mod registry;
pub mod stat;

pub use bonus::{Bonus, BonusStack};
pub use registry::{StatBonuses, StatError, StatEvent, StatId, StatRegistry, StatSnapshot};
pub use stat::{Growth, Stat, StatChange, StatDefinition, Threshold};
