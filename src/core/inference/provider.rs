//! Model sources and the ONNX-backed model provider.

use super::ort_infer::OrtInfer;
use crate::core::config::PipelineConfig;
use crate::core::constants::MODEL_INPUT_SHAPE;
use crate::core::errors::GrainError;
use crate::core::traits::{InferenceEngine, ModelProvider};
use crate::domain::RICE_VARIETIES;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a model artifact comes from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// An ONNX file on disk.
    File(PathBuf),
    /// ONNX bytes already in memory (bundled with the binary, fetched by the caller).
    Memory {
        /// Name used in logs and errors.
        name: String,
        /// Serialized model.
        bytes: Arc<[u8]>,
    },
}

impl ModelSource {
    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            ModelSource::File(path) => path.display().to_string(),
            ModelSource::Memory { name, bytes } => {
                format!("{} ({} bytes in memory)", name, bytes.len())
            }
        }
    }

    /// Short name derived from the source: the file stem or the in-memory name.
    pub fn stem(&self) -> Option<String> {
        match self {
            ModelSource::File(path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string()),
            ModelSource::Memory { name, .. } => Some(name.clone()),
        }
    }
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        ModelSource::File(path)
    }
}

/// Loads the rice classifier through ONNX Runtime.
///
/// Every load builds a fresh session and checks the declared input/output
/// shapes against the `[1, 224, 224, 3]` input and the label table length.
#[derive(Debug, Clone)]
pub struct OnnxModelProvider {
    source: ModelSource,
    config: PipelineConfig,
}

impl OnnxModelProvider {
    /// Creates a provider for the given source with default session settings.
    pub fn new(source: impl Into<ModelSource>) -> Self {
        Self {
            source: source.into(),
            config: PipelineConfig::default(),
        }
    }

    /// Creates a provider from a pipeline configuration.
    ///
    /// Fails with a configuration error when no model path is set.
    pub fn from_config(config: PipelineConfig) -> Result<Self, GrainError> {
        let path = config.model_path.clone().ok_or_else(|| {
            GrainError::invalid_input("pipeline configuration does not name a model_path")
        })?;
        Ok(Self {
            source: ModelSource::File(path),
            config,
        })
    }

    /// Returns the model source.
    pub fn source(&self) -> &ModelSource {
        &self.source
    }
}

impl ModelProvider for OnnxModelProvider {
    fn load(&self) -> Result<Arc<dyn InferenceEngine>, GrainError> {
        let engine = OrtInfer::from_config(&self.source, &self.config)?;
        engine.validate_io_contract(&MODEL_INPUT_SHAPE, RICE_VARIETIES.len())?;
        Ok(Arc::new(engine))
    }

    fn describe(&self) -> String {
        format!("onnx:{}", self.source.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use std::path::Path;

    #[test]
    fn test_source_describe_and_stem() {
        let file = ModelSource::from(PathBuf::from("models/rice_classifier.onnx"));
        assert_eq!(file.stem().as_deref(), Some("rice_classifier"));
        assert!(file.describe().ends_with("rice_classifier.onnx"));

        let memory = ModelSource::Memory {
            name: "bundled".to_string(),
            bytes: Arc::from(vec![0u8; 16]),
        };
        assert_eq!(memory.describe(), "bundled (16 bytes in memory)");
    }

    #[test]
    fn test_from_config_requires_model_path() {
        let result = OnnxModelProvider::from_config(PipelineConfig::new());
        assert!(matches!(result, Err(GrainError::InvalidInput { .. })));

        let provider =
            OnnxModelProvider::from_config(PipelineConfig::with_model_path("rice.onnx")).unwrap();
        assert!(matches!(provider.source(), ModelSource::File(p) if p == Path::new("rice.onnx")));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let provider = OnnxModelProvider::new(PathBuf::from("does/not/exist.onnx"));
        let error = provider.load().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ModelLoad);
        assert!(provider.describe().starts_with("onnx:"));
    }
}
