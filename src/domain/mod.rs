//! Domain-level structures shared across the classification pipeline.
//!
//! This module groups the label table and the prediction types returned to
//! callers.

pub mod labels;
pub mod prediction;

pub use labels::{RICE_VARIETIES, RiceVariety};
pub use prediction::{Classification, PredictionRecord};
