//! Granular traits for the swappable pieces of the pipeline.
//!
//! The pipeline is assembled from an artifact provider and the inference
//! engine it produces:
//!
//! ```text
//! ┌──────────────┐  load   ┌────────────────┐  infer   ┌─────────────┐
//! │ModelProvider │───────▶│InferenceEngine │────────▶│ [1, classes]│
//! │• load        │         │• infer         │          │   scores    │
//! │• describe    │         │• engine_info   │          └─────────────┘
//! └──────────────┘         └────────────────┘
//! ```
//!
//! The ONNX Runtime implementations live in [`crate::core::inference`]; tests
//! and hosts with their own runtime implement these traits directly.
//!
//! # Examples
//!
//! ```rust
//! use grain_palette::core::traits::InferenceEngine;
//! use grain_palette::core::{GrainError, Tensor2D, Tensor4D};
//!
//! #[derive(Debug)]
//! struct Uniform;
//!
//! impl InferenceEngine for Uniform {
//!     fn infer(&self, input: &Tensor4D) -> Result<Tensor2D, GrainError> {
//!         Ok(Tensor2D::from_elem((input.shape()[0], 6), 1.0 / 6.0))
//!     }
//! }
//!
//! let scores = Uniform.infer(&Tensor4D::zeros((1, 224, 224, 3))).unwrap();
//! assert_eq!(scores.shape(), &[1, 6]);
//! ```

use crate::core::{GrainError, Tensor2D, Tensor4D};
use std::fmt::Debug;
use std::sync::Arc;

/// Trait for model inference.
///
/// Implementations must be deterministic for a fixed artifact and input and
/// must not mutate observable state, so one engine can be shared read-only by
/// every request.
pub trait InferenceEngine: Send + Sync + Debug {
    /// Runs the model on a `[batch, height, width, channels]` tensor and returns
    /// `[batch, classes]` scores.
    fn infer(&self, input: &Tensor4D) -> Result<Tensor2D, GrainError>;

    /// Describes the engine for logs.
    fn engine_info(&self) -> String {
        "Generic inference engine".to_string()
    }
}

/// Trait for fetching and deserializing a model artifact.
///
/// This is the only seam through which the pipeline performs artifact I/O.
pub trait ModelProvider: Send + Sync + Debug {
    /// Fetches the artifact and builds an inference engine from it.
    fn load(&self) -> Result<Arc<dyn InferenceEngine>, GrainError>;

    /// Describes where the artifact comes from.
    fn describe(&self) -> String {
        "model provider".to_string()
    }
}
