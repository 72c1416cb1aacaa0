//! The classification pipeline.
//!
//! This module ties the model loader, image preprocessor, model handle and
//! result ranker together behind a single-flight orchestrator with an explicit
//! lifecycle state machine.

pub mod loader;
pub mod orchestrator;
pub mod state;
pub mod stats;

pub use loader::ModelLoader;
pub use orchestrator::{ClassificationPipeline, ClassificationPipelineBuilder};
pub use state::PipelineState;
pub use stats::{PipelineStats, StatsManager};
