//! Sorts of symbolic values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heap address of a collection instance or map key object.
///
/// Address 0 is reserved for `null`; allocation never hands it out.
pub type HeapAddress = u64;

/// The null reference address
pub const NULL_ADDRESS: HeapAddress = 0;

/// Sort (type) of a symbolic expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    /// Boolean
    Bool,
    /// Signed 64-bit size / index
    Size,
    /// Heap reference
    Ref,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Size => "size",
            Self::Ref => "ref",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
