//! ONNX Runtime inference engine for the rice classifier.

use crate::core::errors::GrainError;
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// A single ONNX Runtime session plus the tensor names used to drive it.
///
/// Runs are serialized through the session mutex, which bounds peak memory to
/// one in-flight forward pass.
pub struct OrtInfer {
    pub(super) session: Mutex<Session>,
    pub(super) input_name: String,
    pub(super) output_name: String,
    pub(super) source_desc: String,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("source", &self.source_desc)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Returns the declared shape of the primary input tensor.
    ///
    /// Dynamic dimensions are returned as-is (non-positive values).
    pub fn primary_input_shape(&self) -> Option<Vec<i64>> {
        let session = self.session.lock().ok()?;
        let input = session.inputs.first()?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Returns the declared shape of the primary output tensor.
    pub fn primary_output_shape(&self) -> Option<Vec<i64>> {
        let session = self.session.lock().ok()?;
        let output = session.outputs.first()?;
        match &output.output_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Checks the declared input/output shapes against the classifier contract.
    ///
    /// See [`check_io_contract`] for the rules.
    pub fn validate_io_contract(
        &self,
        expected_input: &[usize],
        num_classes: usize,
    ) -> Result<(), GrainError> {
        check_io_contract(
            &self.source_desc,
            self.primary_input_shape().as_deref(),
            self.primary_output_shape().as_deref(),
            expected_input,
            num_classes,
        )
    }
}

/// Checks declared model shapes against the classifier contract.
///
/// The input must have the rank of `expected_input` and match it on every
/// dimension after the batch. The output must be `[batch, classes]` with a
/// class dimension equal to `num_classes`. Dynamic dimensions (non-positive
/// values) always pass, as does a shape the model does not declare.
pub(crate) fn check_io_contract(
    source_desc: &str,
    input: Option<&[i64]>,
    output: Option<&[i64]>,
    expected_input: &[usize],
    num_classes: usize,
) -> Result<(), GrainError> {
    if let Some(shape) = input {
        let matches = shape.len() == expected_input.len()
            && shape
                .iter()
                .zip(expected_input)
                .skip(1)
                .all(|(&declared, &expected)| declared <= 0 || declared as usize == expected);
        if !matches {
            return Err(GrainError::model_load_error(
                source_desc,
                format!(
                    "model input shape {:?} does not accept {:?}",
                    shape, expected_input
                ),
                Some("export the classifier with an NHWC [N, 224, 224, 3] float input"),
                None::<GrainError>,
            ));
        }
    }

    if let Some(shape) = output {
        let classes = shape.last().copied().unwrap_or(-1);
        if shape.len() != 2 || (classes > 0 && classes as usize != num_classes) {
            return Err(GrainError::model_load_error(
                source_desc,
                format!(
                    "model output shape {:?} does not produce {} class scores",
                    shape, num_classes
                ),
                Some("retrain or re-export the model against the current label table"),
                None::<GrainError>,
            ));
        }
    }

    Ok(())
}
