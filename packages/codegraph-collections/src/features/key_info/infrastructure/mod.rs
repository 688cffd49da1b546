//! Key-info implementations

mod composite;
mod heap_ref;
mod index;
mod no_key;

pub use composite::{ArrayIndexKeyInfo, CompositeKeyInfo, MapKeyInfo};
pub use heap_ref::HeapRefKeyInfo;
pub use index::{IndexKeyInfo, DEFAULT_RANGE_LIMIT};
pub use no_key::{NoKey, NoKeyInfo};
