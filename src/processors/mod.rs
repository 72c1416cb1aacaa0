//! Image processing and score post-processing for the classifier.
//!
//! # Modules
//!
//! * `normalization` - Channel-wise normalization into input tensors
//! * `preprocess` - The fixed resize/convert/normalize pipeline
//! * `ranking` - Mapping raw scores to ranked, labeled predictions

mod normalization;
pub mod preprocess;
pub mod ranking;

pub use normalization::*;
pub use preprocess::ImagePreprocessor;
pub use ranking::ResultRanker;
