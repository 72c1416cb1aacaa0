//! Lifecycle states of the classification pipeline.

use serde::Serialize;
use std::fmt;

/// Where the pipeline is in its lifecycle.
///
/// ```text
/// Idle ──load──▶ Loading ──ok──▶ Ready ◀──done── Classifying
///                   │              └──classify──────▲
///                   └──err──▶ Failed ──retry──▶ Loading
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    /// No load has been attempted.
    #[default]
    Idle,
    /// The model artifact is being fetched and deserialized.
    Loading,
    /// A model is loaded and no classification is running.
    Ready,
    /// A classification is running.
    Classifying,
    /// The last load failed; only an explicit retry leaves this state.
    Failed,
}

impl PipelineState {
    /// True when a new classification may start.
    pub fn accepts_requests(self) -> bool {
        self == PipelineState::Ready
    }

    /// True when a model is loaded (ready or busy classifying).
    pub fn has_model(self) -> bool {
        matches!(self, PipelineState::Ready | PipelineState::Classifying)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Loading => "loading",
            PipelineState::Ready => "ready",
            PipelineState::Classifying => "classifying",
            PipelineState::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serialize_agree() {
        for state in [
            PipelineState::Idle,
            PipelineState::Loading,
            PipelineState::Ready,
            PipelineState::Classifying,
            PipelineState::Failed,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }

    #[test]
    fn test_predicates() {
        assert!(PipelineState::Ready.accepts_requests());
        assert!(!PipelineState::Classifying.accepts_requests());
        assert!(PipelineState::Classifying.has_model());
        assert!(!PipelineState::Failed.has_model());
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }
}
