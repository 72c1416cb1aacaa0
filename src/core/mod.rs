//! The core module of the classification pipeline.
//!
//! This module contains the fundamental components shared by the pipeline:
//! - Configuration management
//! - Constants forming the model input contract
//! - Error handling
//! - Inference engine integration
//! - Traits for swappable model providers and engines
//!
//! It also provides re-exports of commonly used types and functions for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod tensor;
pub mod traits;

pub use crate::utils::{decode_image, load_image};
pub use config::{ConfigError, ConfigValidator, OrtSessionConfig, PipelineConfig};
pub use constants::*;
pub use errors::{ErrorKind, GrainError, GrainResult, SimpleError};
pub use inference::{ModelHandle, ModelSource, OnnxModelProvider, OrtInfer};
pub use tensor::{ScoreVector, Tensor2D, Tensor4D};
pub use traits::{InferenceEngine, ModelProvider};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
