//! Pipeline configuration.

use super::errors::{ConfigError, ConfigValidator};
use super::onnx::OrtSessionConfig;
use crate::core::GrainError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the classification pipeline.
///
/// Only the model artifact is configurable; the input geometry, normalization
/// statistics and label table are fixed by the model contract.
///
/// ```rust
/// use grain_palette::core::config::PipelineConfig;
///
/// let config: PipelineConfig = serde_json::from_str(r#"
/// {
///   "model_path": "models/rice_classifier.onnx",
///   "model_name": "rice-cnn",
///   "ort_session": { "intra_threads": 2 }
/// }
/// "#).unwrap();
/// assert_eq!(config.model_name.as_deref(), Some("rice-cnn"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the ONNX model file.
    pub model_path: Option<PathBuf>,
    /// Human-readable model name used in logs and errors.
    pub model_name: Option<String>,
    /// Input tensor name; discovered from the session when unset.
    pub input_name: Option<String>,
    /// Output tensor name; discovered from the session when unset.
    pub output_name: Option<String>,
    /// ONNX Runtime session configuration.
    pub ort_session: Option<OrtSessionConfig>,
}

impl PipelineConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration pointing at a model file.
    pub fn with_model_path(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Self::default()
        }
    }

    /// Sets the model path.
    pub fn model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(model_path.into());
        self
    }

    /// Sets the model name.
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Sets the input tensor name.
    pub fn input_name(mut self, input_name: impl Into<String>) -> Self {
        self.input_name = Some(input_name.into());
        self
    }

    /// Sets the output tensor name.
    pub fn output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = Some(output_name.into());
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn ort_session(mut self, config: OrtSessionConfig) -> Self {
        self.ort_session = Some(config);
        self
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed {
            message: e.to_string(),
        })
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GrainError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json_str(&contents)?)
    }

    /// Returns the model name, falling back to the model file stem.
    pub fn resolved_model_name(&self) -> String {
        self.model_name
            .clone()
            .or_else(|| {
                self.model_path
                    .as_deref()
                    .and_then(|p| p.file_stem())
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "rice_classifier".to_string())
    }
}

impl ConfigValidator for PipelineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.model_path {
            self.validate_model_path(path)?;
        }

        self.validate_tensor_name(self.input_name.as_deref(), "input_name")?;
        self.validate_tensor_name(self.output_name.as_deref(), "output_name")?;

        if let Some(ort) = &self.ort_session {
            if let Some(threads) = ort.intra_threads {
                self.validate_thread_count(threads, "intra_threads")?;
            }
            if let Some(threads) = ort.inter_threads {
                self.validate_thread_count(threads, "inter_threads")?;
            }
            if let Some(level) = ort.log_severity_level {
                if !(0..=4).contains(&level) {
                    return Err(ConfigError::InvalidConfig {
                        message: format!("log_severity_level must be within 0..=4, got {level}"),
                    });
                }
            }
        }

        Ok(())
    }
}
