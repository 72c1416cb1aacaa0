//! Error constructor and inspection helpers.
//!
//! Constructors keep call sites short and make sure every wrapped error keeps
//! its source chain. Inspection helpers (`kind`, `root_cause`,
//! `is_contract_violation`) are what callers use to decide how to render a
//! failure.
//!
//! ```rust
//! use grain_palette::core::{ErrorKind, GrainError};
//!
//! let cause = GrainError::invalid_image("image has zero area (0x10)");
//! let error = GrainError::classification_failed(cause);
//!
//! assert_eq!(error.kind(), ErrorKind::ClassificationFailed);
//! assert_eq!(error.root_cause().kind(), ErrorKind::InvalidImage);
//! ```

use super::types::{ErrorKind, GrainError};

impl GrainError {
    /// Creates a model load error with an optional suggestion and source.
    ///
    /// # Arguments
    ///
    /// * `source_desc` - Where the artifact came from (path or description)
    /// * `reason` - Short reason description
    /// * `suggestion` - Optional suggestion message (without punctuation)
    /// * `source` - Optional underlying error
    pub fn model_load_error(
        source_desc: impl Into<String>,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let suggestion = suggestion
            .map(|s| format!("; suggested fix: {}", s))
            .unwrap_or_default();
        Self::ModelLoad {
            source_desc: source_desc.into(),
            reason: reason.into(),
            suggestion,
            source: source.map(|e| Box::new(e) as _),
        }
    }

    /// Creates an invalid image error without an underlying decoder error.
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid image error wrapping a decoder error.
    pub fn invalid_image_with_source(
        message: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidImage {
            message: message.into(),
            source: Some(Box::new(error)),
        }
    }

    /// Creates a shape mismatch error.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Wraps a component error into the aggregated request failure.
    ///
    /// Already-wrapped errors are returned unchanged so a cause is never
    /// wrapped twice.
    pub fn classification_failed(cause: GrainError) -> Self {
        match cause {
            wrapped @ Self::ClassificationFailed { .. } => wrapped,
            other => Self::ClassificationFailed {
                source: Box::new(other),
            },
        }
    }

    /// Creates an inference error for the named model.
    pub fn inference_error(
        model_name: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a tensor operation error.
    pub fn tensor_operation(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::TensorOperation {
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns the caller-facing kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ModelLoad { .. } => ErrorKind::ModelLoad,
            Self::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
            Self::InvalidImage { .. } => ErrorKind::InvalidImage,
            Self::Busy => ErrorKind::Busy,
            Self::ClassificationFailed { .. } => ErrorKind::ClassificationFailed,
            Self::ShapeMismatch { .. }
            | Self::ScoreVectorLength { .. }
            | Self::NonFiniteScore { .. } => ErrorKind::ContractViolation,
            Self::Inference { .. }
            | Self::TensorOperation { .. }
            | Self::InvalidInput { .. }
            | Self::Config(_)
            | Self::Tensor(_)
            | Self::Io(_) => ErrorKind::Internal,
        }
    }

    /// Returns the original cause of an aggregated failure, or `self`.
    pub fn root_cause(&self) -> &GrainError {
        match self {
            Self::ClassificationFailed { source } => source.root_cause(),
            other => other,
        }
    }

    /// True for internal invariant breaks (model/label mismatch), which point
    /// at a build-time misconfiguration rather than bad user input.
    pub fn is_contract_violation(&self) -> bool {
        self.root_cause().kind() == ErrorKind::ContractViolation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineState;

    #[test]
    fn test_model_load_error_formats_suggestion() {
        let error = GrainError::model_load_error(
            "models/rice.onnx",
            "failed to create ONNX session",
            Some("verify the model file exists"),
            None::<std::io::Error>,
        );

        assert_eq!(
            error.to_string(),
            "failed to load model from 'models/rice.onnx': failed to create ONNX session; suggested fix: verify the model file exists"
        );
        assert_eq!(error.kind(), ErrorKind::ModelLoad);
    }

    #[test]
    fn test_classification_failed_keeps_cause() {
        let error = GrainError::classification_failed(GrainError::ScoreVectorLength {
            expected: 6,
            actual: 4,
        });

        assert_eq!(error.kind(), ErrorKind::ClassificationFailed);
        assert!(matches!(
            error.root_cause(),
            GrainError::ScoreVectorLength {
                expected: 6,
                actual: 4
            }
        ));
        assert!(error.is_contract_violation());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_classification_failed_is_not_nested() {
        let once = GrainError::classification_failed(GrainError::invalid_image("empty"));
        let twice = GrainError::classification_failed(once);

        match twice {
            GrainError::ClassificationFailed { source } => {
                assert_eq!(source.kind(), ErrorKind::InvalidImage);
            }
            other => panic!("Expected ClassificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_user_errors_are_not_contract_violations() {
        assert!(!GrainError::Busy.is_contract_violation());
        assert!(!GrainError::invalid_image("bad").is_contract_violation());
        assert!(
            !GrainError::ModelUnavailable {
                state: PipelineState::Failed
            }
            .is_contract_violation()
        );
        assert!(GrainError::shape_mismatch(&[1, 224, 224, 3], &[1, 3, 224, 224])
            .is_contract_violation());
    }

    #[test]
    fn test_model_unavailable_message_names_state() {
        let error = GrainError::ModelUnavailable {
            state: PipelineState::Failed,
        };
        assert_eq!(error.to_string(), "model unavailable: pipeline is failed");
    }
}
