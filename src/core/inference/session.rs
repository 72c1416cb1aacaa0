//! Helpers for building ONNX Runtime sessions.

use super::provider::ModelSource;
use crate::core::errors::GrainError;
use ort::session::{Session, builder::SessionBuilder};

const SESSION_CREATION_FAILURE: &str = "failed to create ONNX session";
const SESSION_OPTIONS_FAILURE: &str = "failed to apply ONNX session options";

/// Builds a session from a model source using a caller-provided builder configuration.
///
/// Every failure, including runtime initialization and rejected session
/// options, is reported as [`GrainError::ModelLoad`].
pub(crate) fn load_session_with<F>(
    source: &ModelSource,
    configure_builder: F,
    suggestion: Option<&str>,
) -> Result<Session, GrainError>
where
    F: FnOnce(SessionBuilder) -> Result<SessionBuilder, ort::Error>,
{
    let load_error = |reason: &str, e: ort::Error| {
        GrainError::model_load_error(source.describe(), reason, suggestion, Some(e))
    };

    let builder = Session::builder().map_err(|e| load_error(SESSION_CREATION_FAILURE, e))?;
    let builder = configure_builder(builder).map_err(|e| load_error(SESSION_OPTIONS_FAILURE, e))?;
    let session = match source {
        ModelSource::File(path) => builder.commit_from_file(path),
        ModelSource::Memory { bytes, .. } => builder.commit_from_memory(bytes),
    }
    .map_err(|e| load_error(SESSION_CREATION_FAILURE, e))?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    #[test]
    fn test_rejected_session_options_are_model_load_errors() {
        let source = ModelSource::File("models/rice.onnx".into());
        let error = load_session_with(
            &source,
            |_| Err(ort::Error::new("intra-op thread count rejected")),
            None,
        )
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ModelLoad);
        assert!(error.to_string().contains(SESSION_OPTIONS_FAILURE));
        assert!(error.to_string().contains("models/rice.onnx"));
    }
}
