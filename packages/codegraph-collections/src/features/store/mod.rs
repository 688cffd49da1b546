//! Guarded symbolic store
//!
//! The external store the collection protocols thread through: descriptor
//! namespaced element stores, length scalars and the path constraint sink.
//! [`MemoryStore`] is the in-memory adapter used by the engine and tests.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{CollectionKind, Descriptor, LengthWrite, StoreError, StoreResult, UpdateNode};
pub use infrastructure::{LengthLog, MemoryStore, PathConstraints, UpdateLog};
pub use ports::{PathConstraintSink, SymbolicStore};
