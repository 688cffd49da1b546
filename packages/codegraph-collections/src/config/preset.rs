//! Preset configurations
//!
//! Presets trade solver-facing precision against the size of the formulas
//! the collection protocols emit.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Quick exploration
    ///
    /// - Small concrete ranges only (256 keys)
    /// - Input sizes bounded by 1_000
    Fast,

    /// Default exploration
    ///
    /// - Concrete ranges up to 4096 keys
    /// - Input sizes bounded by 100_000
    #[default]
    Balanced,

    /// Exhaustive exploration
    ///
    /// - Concrete ranges up to 65536 keys
    /// - Symbolic input sizes clamped to be non-negative on read
    Thorough,
}

impl Preset {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }

    pub fn all() -> [Preset; 3] {
        [Self::Fast, Self::Balanced, Self::Thorough]
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
