//! Structures and helpers for running the classifier.
//!
//! This module centralizes the ONNX Runtime engine, the provider that builds it
//! from a model source, and the [`ModelHandle`] the pipeline invokes.

pub mod handle;
pub mod ort_infer;
pub mod provider;
pub mod session;

pub use handle::ModelHandle;
pub use ort_infer::OrtInfer;
pub use provider::{ModelSource, OnnxModelProvider};
