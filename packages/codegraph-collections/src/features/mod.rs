//! Feature slices
//!
//! - `expr`: symbolic expressions and models
//! - `regions`: key-set over-approximations
//! - `key_info`: per key-kind comparison and region tables
//! - `store`: guarded symbolic store and path constraints
//! - `collections`: list and object-map protocols

pub mod collections;
pub mod expr;
pub mod key_info;
pub mod regions;
pub mod store;
