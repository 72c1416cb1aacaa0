//! Error types for the classification pipeline.
//!
//! Every component reports failures as [`GrainError`]. The orchestrator wraps
//! request-scoped component failures into [`GrainError::ClassificationFailed`]
//! so callers see one error shape, while [`GrainError::kind`] and
//! [`GrainError::root_cause`] keep the original cause inspectable.
//!
//! # Usage
//!
//! ```rust
//! use grain_palette::core::errors::{ErrorKind, GrainError};
//!
//! let error = GrainError::tensor_operation(
//!     "failed to build input tensor",
//!     std::io::Error::other("out of memory"),
//! );
//! assert_eq!(error.to_string(), "tensor operation failed: failed to build input tensor");
//! assert_eq!(error.kind(), ErrorKind::Internal);
//! ```

pub mod constructors;
pub mod types;

pub use types::{BoxedError, ErrorKind, GrainError, SimpleError};

/// Convenient result alias for pipeline operations.
pub type GrainResult<T> = Result<T, GrainError>;
