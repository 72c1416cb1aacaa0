//! Error type definitions for the classification pipeline.

use crate::core::config::ConfigError;
use crate::pipeline::PipelineState;
use thiserror::Error;

/// Boxed error used as the source of wrapped failures.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of a [`GrainError`] for callers that render messages.
///
/// This is the error surface a UI layer matches on; it deliberately collapses
/// runtime and tensor internals into [`ErrorKind::Internal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    /// The model artifact could not be fetched or deserialized.
    ModelLoad,
    /// No model is available in the current pipeline state.
    ModelUnavailable,
    /// The input is not a decodable image or has zero area.
    InvalidImage,
    /// Another classification is in flight.
    Busy,
    /// A classification request failed; see the wrapped cause.
    ClassificationFailed,
    /// An internal invariant was broken (model/label table mismatch).
    ContractViolation,
    /// Any other internal failure.
    Internal,
}

/// Errors produced by the rice classification pipeline.
#[derive(Error, Debug)]
pub enum GrainError {
    /// The model artifact could not be fetched, deserialized or validated.
    #[error("failed to load model from '{source_desc}': {reason}{suggestion}")]
    ModelLoad {
        /// Where the artifact was loaded from (path or description).
        source_desc: String,
        /// Short reason.
        reason: String,
        /// Optional "; suggested fix: ..." suffix.
        suggestion: String,
        /// Underlying error, if any.
        #[source]
        source: Option<BoxedError>,
    },

    /// Classification was requested while no model is loaded.
    #[error("model unavailable: pipeline is {state}")]
    ModelUnavailable {
        /// Pipeline state at the time of the request.
        state: PipelineState,
    },

    /// The input could not be decoded as an image, or decodes to zero area.
    #[error("invalid image: {message}")]
    InvalidImage {
        /// What was wrong with the input.
        message: String,
        /// Decoder error, if any.
        #[source]
        source: Option<BoxedError>,
    },

    /// The tensor handed to the model does not have the contract shape.
    #[error("tensor shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Required shape.
        expected: Vec<usize>,
        /// Shape that was supplied.
        actual: Vec<usize>,
    },

    /// The model produced a score vector whose length differs from the label table.
    #[error("score vector length mismatch: expected {expected} scores, got {actual}")]
    ScoreVectorLength {
        /// Number of known class labels.
        expected: usize,
        /// Number of scores produced.
        actual: usize,
    },

    /// The model produced a NaN or infinite score.
    #[error("non-finite score {value} for class index {class_index}")]
    NonFiniteScore {
        /// Position of the offending score in the model output.
        class_index: usize,
        /// The score itself.
        value: f32,
    },

    /// A classification is already in progress.
    #[error("a classification is already in progress")]
    Busy,

    /// A classification request failed; `source` carries the original cause.
    #[error("classification failed: {source}")]
    ClassificationFailed {
        /// The component error that aborted the request.
        #[source]
        source: Box<GrainError>,
    },

    /// The inference engine failed while running the model.
    #[error("inference failed for model '{model_name}': {context}")]
    Inference {
        /// Model that failed.
        model_name: String,
        /// Additional context.
        context: String,
        /// Underlying engine error.
        #[source]
        source: BoxedError,
    },

    /// Building or reshaping a tensor failed.
    #[error("tensor operation failed: {context}")]
    TensorOperation {
        /// What was being built.
        context: String,
        /// Underlying error.
        #[source]
        source: BoxedError,
    },

    /// Invalid argument passed to a component.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was invalid.
        message: String,
    },

    /// Configuration problem.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error from ndarray shape operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Minimal error carrying only a message, used as a `source` where no
/// underlying error exists.
#[derive(Debug, Clone)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new simple error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SimpleError {}
