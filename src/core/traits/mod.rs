//! Trait definitions for the classification pipeline.
//!
//! See [`granular`] for the model provider and inference engine seams.

pub mod granular;

pub use granular::{InferenceEngine, ModelProvider};
