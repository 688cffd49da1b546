//! Configuration
//!
//! Two levels:
//! - Preset: `CollectionConfig::from_preset(Preset::Fast)`
//! - YAML / builder overrides on top of a preset
//!
//! ```rust,ignore
//! use codegraph_collections::config::{CollectionConfig, Preset};
//!
//! let config = CollectionConfig::from_preset(Preset::Balanced).range_enumeration_limit(512);
//! let config = CollectionConfig::from_yaml_str("version: 1\npreset: thorough\n")?;
//! ```

pub mod collection_config;
pub mod error;
pub mod preset;
pub mod validation;

// Re-exports
pub use collection_config::{CollectionConfig, SUPPORTED_VERSIONS};
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
pub use validation::Validatable;
