//! # GrainPalette
//!
//! Local rice variety classification: hand over an image of rice grains and get
//! back ranked variety predictions computed by a pre-trained classifier running
//! on ONNX Runtime.
//!
//! ## Features
//!
//! - Load-once model cache with explicit retry after a failed load
//! - Deterministic ImageNet preprocessing into a `[1, 224, 224, 3]` tensor
//! - Ranked, labeled predictions over six rice varieties
//! - Single-flight orchestrator with an explicit lifecycle state machine
//! - Pluggable model providers and inference engines
//!
//! ## Modules
//!
//! * [`core`] - Configuration, errors, inference engine integration and traits
//! * [`domain`] - The label table and prediction types
//! * [`pipeline`] - Model loader, state machine and orchestrator
//! * [`processors`] - Image preprocessing and score ranking
//! * [`utils`] - Image decoding and loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grain_palette::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = ClassificationPipelineBuilder::new()
//!     .config(PipelineConfig::with_model_path("models/rice_classifier.onnx"))
//!     .load_on_build(true)
//!     .build()?;
//!
//! let image = load_image(std::path::Path::new("grains.jpg"))?;
//! for record in &pipeline.classify(&image)? {
//!     println!("{}", record);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### JSON Configuration
//!
//! ```rust,no_run
//! use grain_palette::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::from_json_str(r#"
//! {
//!   "model_path": "models/rice_classifier.onnx",
//!   "model_name": "rice-cnn",
//!   "ort_session": {
//!     "intra_threads": 4,
//!     "optimization_level": "Level3"
//!   }
//! }
//! "#)?;
//!
//! let pipeline = ClassificationPipelineBuilder::new().config(config).build()?;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use grain_palette::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - The pipeline and its builder, state and statistics
/// - Configuration (`PipelineConfig`, `OrtSessionConfig`)
/// - Results (`Classification`, `PredictionRecord`, `RiceVariety`)
/// - Essential error and result types (`GrainError`, `GrainResult`, `ErrorKind`)
/// - Image loading (`decode_image`, `load_image`)
///
/// For custom model providers or engines, import from `grain_palette::core::traits`.
pub mod prelude {
    pub use crate::pipeline::{
        ClassificationPipeline, ClassificationPipelineBuilder, PipelineState, PipelineStats,
    };

    pub use crate::core::{ErrorKind, GrainError, GrainResult, OrtSessionConfig, PipelineConfig};

    pub use crate::domain::{Classification, PredictionRecord, RICE_VARIETIES, RiceVariety};

    pub use crate::utils::{decode_image, is_supported_image, load_image};
}
