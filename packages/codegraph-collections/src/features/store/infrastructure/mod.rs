//! Store adapters

mod memory_store;
mod path_constraints;
mod update_log;

pub use memory_store::MemoryStore;
pub use path_constraints::PathConstraints;
pub use update_log::{LengthLog, UpdateLog};
