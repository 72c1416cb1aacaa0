//! Load-once cache around a model provider.

use crate::core::inference::ModelHandle;
use crate::core::traits::ModelProvider;
use crate::core::GrainError;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Fetches the model artifact at most once per loader and caches the handle.
///
/// A failed load caches nothing, so the next call fetches from scratch. After
/// a successful load every call returns a clone of the same handle without
/// touching the provider.
#[derive(Debug)]
pub struct ModelLoader {
    provider: Arc<dyn ModelProvider>,
    cache: OnceCell<ModelHandle>,
}

impl ModelLoader {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            cache: OnceCell::new(),
        }
    }

    /// Returns the cached handle, loading it through the provider if needed.
    ///
    /// # Errors
    ///
    /// Returns [`GrainError::ModelLoad`] (or whatever the provider reports)
    /// when the artifact cannot be fetched, deserialized or validated.
    pub fn load(&self) -> Result<ModelHandle, GrainError> {
        self.cache
            .get_or_try_init(|| {
                let description = self.provider.describe();
                let start = Instant::now();
                match self.provider.load() {
                    Ok(engine) => {
                        let handle = ModelHandle::new(engine, description);
                        info!(
                            model = handle.name(),
                            engine = %handle.engine_info(),
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "model loaded"
                        );
                        Ok(handle)
                    }
                    Err(e) => {
                        warn!(model = %description, "model load failed: {}", e);
                        Err(e)
                    }
                }
            })
            .cloned()
    }

    /// Returns the cached handle without performing any I/O.
    pub fn cached(&self) -> Option<ModelHandle> {
        self.cache.get().cloned()
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Describes the underlying provider.
    pub fn describe(&self) -> String {
        self.provider.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::InferenceEngine;
    use crate::core::{Tensor2D, Tensor4D};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Uniform;

    impl InferenceEngine for Uniform {
        fn infer(&self, input: &Tensor4D) -> Result<Tensor2D, GrainError> {
            Ok(Tensor2D::from_elem((input.shape()[0], 6), 1.0 / 6.0))
        }
    }

    /// Fails the first `failures` loads, then succeeds.
    #[derive(Debug)]
    struct FlakyProvider {
        failures: usize,
        calls: AtomicUsize,
    }

    impl ModelProvider for FlakyProvider {
        fn load(&self) -> Result<Arc<dyn InferenceEngine>, GrainError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(GrainError::model_load_error(
                    "flaky",
                    "network unreachable",
                    None,
                    None::<GrainError>,
                ));
            }
            Ok(Arc::new(Uniform))
        }
    }

    #[test]
    fn test_load_is_cached() {
        let provider = Arc::new(FlakyProvider {
            failures: 0,
            calls: AtomicUsize::new(0),
        });
        let loader = ModelLoader::new(provider.clone());
        assert!(loader.cached().is_none());

        loader.load().unwrap();
        loader.load().unwrap();
        assert!(loader.is_loaded());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let provider = Arc::new(FlakyProvider {
            failures: 1,
            calls: AtomicUsize::new(0),
        });
        let loader = ModelLoader::new(provider.clone());

        assert!(matches!(loader.load(), Err(GrainError::ModelLoad { .. })));
        assert!(!loader.is_loaded());

        loader.load().unwrap();
        assert!(loader.is_loaded());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
