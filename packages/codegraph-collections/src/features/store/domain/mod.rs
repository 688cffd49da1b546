//! Store domain: descriptors, guarded updates, errors

mod descriptor;
mod error;
mod update;

pub use descriptor::{CollectionKind, Descriptor};
pub use error::{StoreError, StoreResult};
pub use update::{LengthWrite, UpdateNode};
