//! Configuration error types and validation traits.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {message}")]
    ParseFailed { message: String },
}

/// A trait for validating configuration parameters.
///
/// Implementors provide `validate`; the remaining methods are reusable checks
/// for common fields. Checks are syntactic only: whether the artifact can be
/// read is decided when the model loads.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Validates that a model path is not blank.
    fn validate_model_path(&self, path: &Path) -> Result<(), ConfigError> {
        if path.as_os_str().is_empty() {
            Err(ConfigError::InvalidConfig {
                message: "model_path must not be empty".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a thread count is positive.
    fn validate_thread_count(&self, threads: usize, field: &str) -> Result<(), ConfigError> {
        if threads == 0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{field} must be greater than 0"),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that an optional tensor name is not blank.
    fn validate_tensor_name(&self, name: Option<&str>, field: &str) -> Result<(), ConfigError> {
        match name {
            Some(name) if name.trim().is_empty() => Err(ConfigError::InvalidConfig {
                message: format!("{field} must not be empty"),
            }),
            _ => Ok(()),
        }
    }
}

/// Extension trait that folds configuration errors into [`GrainError`].
///
/// [`GrainError`]: crate::core::GrainError
pub trait ConfigValidatorExt: ConfigValidator + Sized {
    /// Validates the configuration and returns it on success.
    fn validate_and_wrap(self) -> Result<Self, crate::core::GrainError> {
        self.validate()?;
        Ok(self)
    }
}

impl<T: ConfigValidator + Sized> ConfigValidatorExt for T {}
