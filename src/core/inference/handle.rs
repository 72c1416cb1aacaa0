//! Shared handle to a loaded classifier.

use crate::core::constants::MODEL_INPUT_SHAPE;
use crate::core::errors::{GrainError, SimpleError};
use crate::core::traits::InferenceEngine;
use crate::core::{ScoreVector, Tensor4D};
use std::sync::Arc;
use tracing::error;

/// Cheap-to-clone reference to a loaded inference engine.
///
/// Created once by the model loader and read-only afterwards. Running the
/// model through the handle never mutates it.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    engine: Arc<dyn InferenceEngine>,
    name: Arc<str>,
}

impl ModelHandle {
    /// Wraps an engine under a display name.
    pub fn new(engine: Arc<dyn InferenceEngine>, name: impl Into<Arc<str>>) -> Self {
        Self {
            engine,
            name: name.into(),
        }
    }

    /// Name of the loaded model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Engine description for logs.
    pub fn engine_info(&self) -> String {
        self.engine.engine_info()
    }

    /// Runs the classifier on a preprocessed tensor.
    ///
    /// The tensor must be exactly `[1, 224, 224, 3]`. The returned vector holds
    /// one score per class in label order; its length is checked by the ranker.
    pub fn infer(&self, tensor: &Tensor4D) -> Result<ScoreVector, GrainError> {
        if tensor.shape() != MODEL_INPUT_SHAPE {
            let error = GrainError::shape_mismatch(&MODEL_INPUT_SHAPE, tensor.shape());
            error!(model = %self.name, "{}", error);
            return Err(error);
        }

        let output = self.engine.infer(tensor)?;
        if output.nrows() != 1 {
            return Err(GrainError::inference_error(
                &self.name,
                "engine output batch does not match input batch",
                SimpleError::new(format!("expected 1 output row, got {}", output.nrows())),
            ));
        }

        Ok(output.row(0).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tensor2D;
    use crate::core::errors::ErrorKind;
    use ndarray::Array2;

    #[derive(Debug)]
    struct FixedEngine {
        rows: usize,
    }

    impl InferenceEngine for FixedEngine {
        fn infer(&self, _input: &Tensor4D) -> Result<Tensor2D, GrainError> {
            Ok(Array2::from_shape_fn((self.rows, 6), |(_, c)| c as f32 / 15.0))
        }
    }

    fn handle(rows: usize) -> ModelHandle {
        ModelHandle::new(Arc::new(FixedEngine { rows }), "fixed")
    }

    #[test]
    fn test_infer_returns_single_row() {
        let scores = handle(1).infer(&Tensor4D::zeros((1, 224, 224, 3))).unwrap();
        assert_eq!(scores.len(), 6);
        assert_eq!(scores[5], 5.0 / 15.0);
    }

    #[test]
    fn test_infer_rejects_wrong_shape() {
        let error = handle(1)
            .infer(&Tensor4D::zeros((1, 3, 224, 224)))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ContractViolation);
        match error {
            GrainError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, vec![1, 224, 224, 3]);
                assert_eq!(actual, vec![1, 3, 224, 224]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_infer_rejects_batched_output() {
        let error = handle(2)
            .infer(&Tensor4D::zeros((1, 224, 224, 3)))
            .unwrap_err();
        assert!(matches!(error, GrainError::Inference { .. }));
    }

    #[test]
    fn test_handle_is_deterministic() {
        let handle = handle(1);
        let input = Tensor4D::from_elem((1, 224, 224, 3), 0.5);
        assert_eq!(handle.infer(&input).unwrap(), handle.infer(&input).unwrap());
        assert_eq!(handle.name(), "fixed");
    }
}
