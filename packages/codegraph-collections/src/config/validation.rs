//! Configuration validation

use super::error::{ConfigError, ConfigResult};

/// Configuration objects that can check their own bounds
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    fn config_name(&self) -> &'static str;

    /// `validate`, logging the rejection under the config's name
    fn ensure_valid(&self) -> ConfigResult<()> {
        self.validate().inspect_err(|err| {
            tracing::warn!("[{}] rejected: {}", self.config_name(), err);
        })
    }
}

/// `min <= value <= max`, or a range error carrying `hint`
pub(crate) fn check_range<T>(field: &str, value: T, min: T, max: T, hint: &str) -> ConfigResult<()>
where
    T: PartialOrd + ToString,
{
    if value < min || value > max {
        return Err(ConfigError::range_with_hint(field, value, min, max, hint));
    }
    Ok(())
}
