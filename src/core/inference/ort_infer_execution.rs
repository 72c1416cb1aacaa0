use super::*;
use crate::core::errors::SimpleError;
use crate::core::traits::InferenceEngine;
use crate::core::{Tensor2D, Tensor4D};
use ndarray::ArrayView2;
use ort::value::TensorRef;

impl OrtInfer {
    /// Returns a description of where the model was loaded from.
    pub fn source_desc(&self) -> &str {
        &self.source_desc
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Runs the session and returns the primary output as `[batch, classes]`.
    pub fn infer_2d(&self, x: &Tensor4D) -> Result<Tensor2D, GrainError> {
        let input_shape = x.shape().to_vec();
        let batch_size = input_shape[0];

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            GrainError::inference_error(
                &self.model_name,
                &format!("failed to convert input tensor with shape {:?}", input_shape),
                e,
            )
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            GrainError::inference_error(
                &self.model_name,
                "failed to acquire session lock",
                SimpleError::new("session lock poisoned"),
            )
        })?;

        let outputs = session.run(inputs).map_err(|e| {
            GrainError::inference_error(
                &self.model_name,
                &format!(
                    "ONNX Runtime inference failed with input '{}' -> output '{}'",
                    self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                GrainError::inference_error(
                    &self.model_name,
                    &format!("failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        if output_shape.len() != 2 {
            return Err(GrainError::inference_error(
                &self.model_name,
                &format!(
                    "expected 2D output tensor, got {}D with shape {:?}",
                    output_shape.len(),
                    output_shape
                ),
                SimpleError::new("invalid output tensor dimensions"),
            ));
        }

        let num_classes = output_shape[1].max(0) as usize;
        let expected_len = batch_size * num_classes;
        if output_data.len() != expected_len {
            return Err(GrainError::inference_error(
                &self.model_name,
                &format!(
                    "output data size mismatch for input shape {:?} -> output shape {:?}",
                    input_shape, output_shape
                ),
                SimpleError::new(format!(
                    "expected {} values, got {}",
                    expected_len,
                    output_data.len()
                )),
            ));
        }

        let array_view = ArrayView2::from_shape((batch_size, num_classes), output_data)?;
        Ok(array_view.to_owned())
    }
}

impl InferenceEngine for OrtInfer {
    fn infer(&self, input: &Tensor4D) -> Result<Tensor2D, GrainError> {
        self.infer_2d(input)
    }

    fn engine_info(&self) -> String {
        format!(
            "ONNX Runtime model '{}' ({} -> {}) from {}",
            self.model_name, self.input_name, self.output_name, self.source_desc
        )
    }
}
