//! Collection protocol configuration
//!
//! # YAML
//! ```yaml
//! version: 1
//! preset: thorough
//! range_enumeration_limit: 1024
//! ```
//! Fields not listed take the value of the preset (balanced when omitted).

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::{check_range, Validatable};
use serde::{Deserialize, Serialize};

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

const MAX_RANGE_ENUMERATION_LIMIT: usize = 1_000_000;
const MAX_INPUT_SIZE_BOUND: i64 = i32::MAX as i64;

/// Knobs of the list / map protocols and the in-memory store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Read the length of input (non-allocated) collections as
    /// `ite(len >= 0, len, 0)` instead of the raw input reading
    pub clamp_input_sizes: bool,

    /// Upper bound asserted by `ensure_size_correct` helpers
    pub max_input_size: i64,

    /// Widest concrete key range enumerated into an explicit region;
    /// wider ranges widen to the universe
    pub range_enumeration_limit: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl CollectionConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                clamp_input_sizes: false,
                max_input_size: 1_000,
                range_enumeration_limit: 256,
            },
            Preset::Balanced => Self {
                clamp_input_sizes: false,
                max_input_size: 100_000,
                range_enumeration_limit: 4096,
            },
            Preset::Thorough => Self {
                clamp_input_sizes: true,
                max_input_size: 1_000_000,
                range_enumeration_limit: 65_536,
            },
        }
    }

    /// Builder: clamp symbolic input sizes on read
    pub fn clamp_input_sizes(mut self, v: bool) -> Self {
        self.clamp_input_sizes = v;
        self
    }

    /// Builder: set max input size
    pub fn max_input_size(mut self, v: i64) -> Self {
        self.max_input_size = v;
        self
    }

    /// Builder: set range enumeration limit
    pub fn range_enumeration_limit(mut self, v: usize) -> Self {
        self.range_enumeration_limit = v;
        self
    }

    /// Parse a versioned YAML document and validate the result
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::from_preset(file.preset);
        if let Some(v) = file.clamp_input_sizes {
            config.clamp_input_sizes = v;
        }
        if let Some(v) = file.max_input_size {
            config.max_input_size = v;
        }
        if let Some(v) = file.range_enumeration_limit {
            config.range_enumeration_limit = v;
        }

        config.ensure_valid()?;
        tracing::debug!(
            "Loaded collection config (preset={}, clamp_input_sizes={}, max_input_size={}, range_enumeration_limit={})",
            file.preset,
            config.clamp_input_sizes,
            config.max_input_size,
            config.range_enumeration_limit
        );
        Ok(config)
    }

    /// Export as a version 1 YAML document with every field explicit
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(SUPPORTED_VERSIONS[0]),
            preset: Preset::default(),
            clamp_input_sizes: Some(self.clamp_input_sizes),
            max_input_size: Some(self.max_input_size),
            range_enumeration_limit: Some(self.range_enumeration_limit),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        check_range(
            "max_input_size",
            self.max_input_size,
            1,
            MAX_INPUT_SIZE_BOUND,
            "Input collections must be allowed at least one element",
        )?;
        check_range(
            "range_enumeration_limit",
            self.range_enumeration_limit,
            1,
            MAX_RANGE_ENUMERATION_LIMIT,
            "Explicit key ranges are enumerated eagerly; keep the limit small",
        )?;
        Ok(())
    }
}

impl Validatable for CollectionConfig {
    fn validate(&self) -> ConfigResult<()> {
        CollectionConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "CollectionConfig"
    }
}

/// On-disk schema, version 1
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    preset: Preset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clamp_input_sizes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_input_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range_enumeration_limit: Option<usize>,
}
