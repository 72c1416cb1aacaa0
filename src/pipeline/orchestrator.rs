//! The classification pipeline orchestrator.
//!
//! [`ClassificationPipeline`] owns the lifecycle state machine, sequences the
//! loader, preprocessor, model and ranker for each request, and translates
//! component failures into the caller-facing error surface.

use super::loader::ModelLoader;
use super::state::PipelineState;
use super::stats::{PipelineStats, StatsManager};
use crate::core::config::{ConfigValidatorExt, PipelineConfig};
use crate::core::inference::{ModelHandle, OnnxModelProvider};
use crate::core::traits::ModelProvider;
use crate::core::GrainError;
use crate::domain::Classification;
use crate::processors::{ImagePreprocessor, ResultRanker};
use crate::utils::decode_image;
use image::DynamicImage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Rice variety classification pipeline.
///
/// At most one classification runs at a time; concurrent requests are rejected
/// with [`GrainError::Busy`] rather than queued. The state mutex is only held
/// for transitions, never while a component runs.
///
/// ```rust,no_run
/// use grain_palette::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = ClassificationPipelineBuilder::new()
///     .config(PipelineConfig::with_model_path("models/rice_classifier.onnx"))
///     .build()?;
/// pipeline.load()?;
///
/// let bytes = std::fs::read("grains.jpg")?;
/// let classification = pipeline.classify_bytes(&bytes)?;
/// if let Some(top) = classification.top() {
///     println!("{}", top);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClassificationPipeline {
    loader: ModelLoader,
    preprocessor: ImagePreprocessor,
    ranker: ResultRanker,
    state: Mutex<PipelineState>,
    last_load_error: Mutex<Option<String>>,
    stats: StatsManager,
}

/// Puts the pipeline into `on_exit` when dropped, unless finished explicitly.
///
/// Dropping during unwinding also runs, so a panicking component never leaves
/// the pipeline stuck in `Loading` or `Classifying`.
struct StateGuard<'a> {
    state: &'a Mutex<PipelineState>,
    on_exit: PipelineState,
}

impl StateGuard<'_> {
    fn finish(mut self, next: PipelineState) {
        self.on_exit = next;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        *lock(self.state) = self.on_exit;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ClassificationPipeline {
    /// Creates an idle pipeline over a model provider. Nothing is loaded yet.
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            loader: ModelLoader::new(provider),
            preprocessor: ImagePreprocessor::new(),
            ranker: ResultRanker::new(),
            state: Mutex::new(PipelineState::Idle),
            last_load_error: Mutex::new(None),
            stats: StatsManager::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        *lock(&self.state)
    }

    /// Snapshot of request statistics.
    pub fn stats(&self) -> PipelineStats {
        self.stats.get_stats()
    }

    /// Clears request statistics.
    pub fn reset_stats(&self) {
        self.stats.reset_stats();
    }

    /// Message of the most recent load failure, cleared by a successful load.
    pub fn last_load_error(&self) -> Option<String> {
        lock(&self.last_load_error).clone()
    }

    /// The loaded model, if any.
    pub fn model(&self) -> Option<ModelHandle> {
        self.loader.cached()
    }

    /// Loads the model.
    ///
    /// From `Idle` or `Failed` this enters `Loading` and ends in `Ready` or
    /// `Failed`. When a model is already loaded the current state is returned
    /// without reloading.
    ///
    /// # Errors
    ///
    /// * [`GrainError::ModelLoad`] when the artifact cannot be loaded; the
    ///   pipeline is left in `Failed`.
    /// * [`GrainError::Busy`] when another load is in flight.
    pub fn load(&self) -> Result<PipelineState, GrainError> {
        {
            let mut state = lock(&self.state);
            match *state {
                PipelineState::Ready | PipelineState::Classifying => return Ok(*state),
                PipelineState::Loading => return Err(GrainError::Busy),
                PipelineState::Idle | PipelineState::Failed => *state = PipelineState::Loading,
            }
        }
        let guard = StateGuard {
            state: &self.state,
            on_exit: PipelineState::Failed,
        };

        info!(provider = %self.loader.describe(), "loading rice classifier");
        match self.loader.load() {
            Ok(handle) => {
                *lock(&self.last_load_error) = None;
                guard.finish(PipelineState::Ready);
                info!(model = handle.name(), "pipeline ready");
                Ok(PipelineState::Ready)
            }
            Err(e) => {
                *lock(&self.last_load_error) = Some(e.to_string());
                drop(guard);
                warn!("pipeline load failed: {}", e);
                Err(e)
            }
        }
    }

    /// Explicit retry after a failed load. Behaves exactly like [`load`](Self::load).
    pub fn retry(&self) -> Result<PipelineState, GrainError> {
        info!(state = %self.state(), "retrying model load");
        self.load()
    }

    /// Classifies an already decoded image.
    ///
    /// # Errors
    ///
    /// * [`GrainError::ModelUnavailable`] when no model is loaded.
    /// * [`GrainError::Busy`] when another classification is running.
    /// * [`GrainError::ClassificationFailed`] wrapping the component error
    ///   (invalid image, shape mismatch, inference failure, score length
    ///   mismatch).
    pub fn classify(&self, image: &DynamicImage) -> Result<Classification, GrainError> {
        let (handle, guard) = self.admit()?;
        let start = Instant::now();

        let result = self
            .run(&handle, image)
            .map_err(GrainError::classification_failed);

        self.finish_request(&result, start);
        guard.finish(PipelineState::Ready);
        result
    }

    /// Decodes raw upload bytes and classifies the image.
    ///
    /// Admission checks run before decoding. A payload that is empty or cannot
    /// be decoded is rejected with [`GrainError::InvalidImage`] directly;
    /// failures after decoding are wrapped as in [`classify`](Self::classify).
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Classification, GrainError> {
        let (handle, guard) = self.admit()?;
        let start = Instant::now();

        let result = match decode_image(bytes) {
            Ok(image) => self
                .run(&handle, &image)
                .map_err(GrainError::classification_failed),
            Err(e) => Err(e),
        };

        self.finish_request(&result, start);
        guard.finish(PipelineState::Ready);
        result
    }

    /// Moves `Ready` to `Classifying`, or rejects the request without doing any work.
    fn admit(&self) -> Result<(ModelHandle, StateGuard<'_>), GrainError> {
        let mut state = lock(&self.state);
        match *state {
            PipelineState::Ready => {}
            PipelineState::Classifying => {
                debug!("rejecting classification: another request is in flight");
                return Err(GrainError::Busy);
            }
            other => return Err(GrainError::ModelUnavailable { state: other }),
        }

        let handle = self
            .loader
            .cached()
            .ok_or(GrainError::ModelUnavailable { state: *state })?;
        *state = PipelineState::Classifying;
        drop(state);

        Ok((
            handle,
            StateGuard {
                state: &self.state,
                on_exit: PipelineState::Ready,
            },
        ))
    }

    fn run(&self, handle: &ModelHandle, image: &DynamicImage) -> Result<Classification, GrainError> {
        let tensor = self.preprocessor.process(image)?;
        let scores = handle.infer(&tensor)?;
        self.ranker.rank(&scores)
    }

    fn finish_request(&self, result: &Result<Classification, GrainError>, start: Instant) {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.stats.record(result.is_ok(), elapsed_ms);

        match result {
            Ok(classification) => {
                if let Some(top) = classification.top() {
                    debug!(elapsed_ms, "classified as {}", top);
                }
            }
            Err(e) if e.is_contract_violation() => {
                error!("model and label table are out of sync: {}", e);
            }
            Err(e) => warn!("classification failed: {}", e),
        }
    }
}

/// Builder for [`ClassificationPipeline`].
///
/// Either a [`PipelineConfig`] (ONNX model on disk) or a custom
/// [`ModelProvider`] must be supplied. With `load_on_build(true)` the initial
/// load runs during [`build`](Self::build); a load failure does not fail the
/// build but leaves the pipeline in `Failed`, ready for [`retry`](ClassificationPipeline::retry).
#[derive(Debug, Default)]
pub struct ClassificationPipelineBuilder {
    config: Option<PipelineConfig>,
    provider: Option<Arc<dyn ModelProvider>>,
    load_on_build: bool,
}

impl ClassificationPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an ONNX model described by a configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses a custom model provider. Takes precedence over [`config`](Self::config).
    pub fn provider(mut self, provider: impl ModelProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Uses a shared custom model provider.
    pub fn provider_arc(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Loads the model as part of [`build`](Self::build).
    pub fn load_on_build(mut self, load: bool) -> Self {
        self.load_on_build = load;
        self
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when neither a provider nor a well-formed
    /// configuration with a model path was supplied. A model file that is
    /// missing or unreadable is not a build error: it surfaces from
    /// [`ClassificationPipeline::load`] as [`GrainError::ModelLoad`].
    pub fn build(self) -> Result<ClassificationPipeline, GrainError> {
        let provider = match (self.provider, self.config) {
            (Some(provider), _) => provider,
            (None, Some(config)) => {
                let config = config.validate_and_wrap()?;
                Arc::new(OnnxModelProvider::from_config(config)?) as Arc<dyn ModelProvider>
            }
            (None, None) => {
                return Err(GrainError::invalid_input(
                    "either a model provider or a pipeline configuration is required",
                ));
            }
        };

        let pipeline = ClassificationPipeline::new(provider);
        if self.load_on_build {
            // The failure is kept in `last_load_error` and the Failed state.
            let _ = pipeline.load();
        }
        Ok(pipeline)
    }
}
