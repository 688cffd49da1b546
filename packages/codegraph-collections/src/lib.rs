/*
 * Codegraph Collections - Symbolic collection substrate
 *
 * Feature-First Hexagonal Architecture:
 * - features/expr        : Symbolic expressions, sorts, models
 * - features/regions     : Region lattice (key-set over-approximation)
 * - features/key_info    : Per key-kind comparison / region tables
 * - features/store       : Guarded symbolic store + path constraints (ports + in-memory adapter)
 * - features/collections : List and object-map intrinsics
 * - config/              : Presets + YAML configuration
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Store range operations carry full key ranges
#![allow(clippy::should_implement_trait)] // Expr::not / Expr::add are folding constructors

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{CollectionConfig, Preset};
pub use errors::{CollectionError, Result};
pub use features::collections::{CollectionState, ObjectMap, SymbolicList};
pub use features::expr::{Expr, Model, ModelValue, Sort};
pub use features::store::{
    Descriptor, MemoryStore, PathConstraintSink, PathConstraints, SymbolicStore,
};
