//! Collection intrinsics

mod list;
mod object_map;

pub use list::SymbolicList;
pub use object_map::{ObjectMap, MERGED_SIZE_PREFIX};
