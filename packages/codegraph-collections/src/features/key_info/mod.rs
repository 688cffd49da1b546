//! Key-info hierarchy
//!
//! Stateless operation tables per key kind: heap references (unordered),
//! indices (ordered), composite instance-qualified keys and the keyless
//! dimension.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{KeyInfoError, KeyInfoResult};
pub use infrastructure::{
    ArrayIndexKeyInfo, CompositeKeyInfo, HeapRefKeyInfo, IndexKeyInfo, MapKeyInfo, NoKey,
    NoKeyInfo, DEFAULT_RANGE_LIMIT,
};
pub use ports::KeyInfo;
