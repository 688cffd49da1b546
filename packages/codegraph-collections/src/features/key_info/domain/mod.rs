//! Key-info domain: contract violation errors

use thiserror::Error;

/// Misuse of a key-info operation table
///
/// These are contract violations detected at the call site; callers are not
/// expected to recover from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyInfoError {
    /// Ordering requested on an unordered key dimension
    #[error("{key_kind} keys are unordered and cannot be compared")]
    NotComparable { key_kind: &'static str },

    /// Range endpoints that do not share the same instance component
    #[error("Range endpoints must share the same base: from base {from}, to base {to}")]
    RangeBaseMismatch { from: String, to: String },
}

impl KeyInfoError {
    pub fn not_comparable(key_kind: &'static str) -> Self {
        Self::NotComparable { key_kind }
    }
}

/// Key-info result type
pub type KeyInfoResult<T> = Result<T, KeyInfoError>;
