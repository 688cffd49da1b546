//! Symbolic collections
//!
//! List and object-map intrinsics expressed as guarded store operations,
//! range copies and path constraints.

pub mod application;
pub mod domain;

pub use application::{ObjectMap, SymbolicList, MERGED_SIZE_PREFIX};
pub use domain::CollectionState;
