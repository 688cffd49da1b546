//! Error types for codegraph-collections
//!
//! Provides unified error handling across the crate.

use crate::config::ConfigError;
use crate::features::key_info::KeyInfoError;
use crate::features::store::StoreError;
use thiserror::Error;

/// Main error type for collection operations
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Store rejected or could not resolve an operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Key-info contract violation
    #[error("Key error: {0}")]
    KeyInfo(#[from] KeyInfoError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, CollectionError>;
