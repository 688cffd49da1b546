//! Store error types

use crate::features::expr::Sort;
use crate::features::key_info::KeyInfoError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Key-info contract violation while resolving a store operation
    #[error("Key error: {0}")]
    KeyInfo(#[from] KeyInfoError),

    /// Value, key or instance of the wrong sort
    #[error("Sort mismatch for {role}: expected {expected}, found {found}")]
    SortMismatch {
        role: &'static str,
        expected: Sort,
        found: Sort,
    },

    /// Operation not defined for this descriptor kind
    #[error("Unsupported operation '{operation}' on {descriptor}")]
    UnsupportedOperation {
        operation: &'static str,
        descriptor: String,
    },
}

impl StoreError {
    pub fn sort_mismatch(role: &'static str, expected: Sort, found: Sort) -> Self {
        Self::SortMismatch {
            role,
            expected,
            found,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
