//! Configuration management for the classification pipeline.
//!
//! This module provides configuration types, validation traits, and utilities
//! for loading pipeline configuration from JSON.

pub mod errors;
pub mod onnx;
pub mod pipeline;

pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use onnx::{OrtGraphOptimizationLevel, OrtSessionConfig};
pub use pipeline::PipelineConfig;
