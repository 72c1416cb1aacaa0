use super::*;
use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig, PipelineConfig};
use crate::core::inference::provider::ModelSource;
use crate::core::inference::session;
use ort::logging::LogLevel;
use ort::session::builder::SessionBuilder;

impl OrtInfer {
    /// Creates an inference engine from a model source with default session settings.
    pub fn new(source: &ModelSource) -> Result<Self, GrainError> {
        Self::from_config(source, &PipelineConfig::default())
    }

    /// Creates an inference engine from a model source, applying the ORT session
    /// configuration and tensor names from `config`.
    ///
    /// Tensor names that are not configured are taken from the first declared
    /// input and output of the model.
    pub fn from_config(source: &ModelSource, config: &PipelineConfig) -> Result<Self, GrainError> {
        let session = session::load_session_with(
            source,
            |builder| match &config.ort_session {
                Some(cfg) => Self::apply_ort_config(builder, cfg),
                None => builder.with_log_level(LogLevel::Error),
            },
            Some("verify the artifact is a valid ONNX model readable by this runtime"),
        )?;

        let input_name = match &config.input_name {
            Some(name) => name.clone(),
            None => session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| {
                    GrainError::model_load_error(
                        source.describe(),
                        "model declares no inputs",
                        None,
                        None::<GrainError>,
                    )
                })?,
        };

        let output_name = match &config.output_name {
            Some(name) => name.clone(),
            None => session
                .outputs
                .first()
                .map(|output| output.name.clone())
                .ok_or_else(|| {
                    GrainError::model_load_error(
                        source.describe(),
                        "model declares no outputs",
                        Some("model may be invalid or corrupted"),
                        None::<GrainError>,
                    )
                })?,
        };

        let model_name = config
            .model_name
            .clone()
            .or_else(|| source.stem())
            .unwrap_or_else(|| "unknown_model".to_string());

        Ok(OrtInfer {
            session: Mutex::new(session),
            input_name,
            output_name,
            source_desc: source.describe(),
            model_name,
        })
    }

    fn apply_ort_config(
        mut builder: SessionBuilder,
        cfg: &OrtSessionConfig,
    ) -> Result<SessionBuilder, ort::Error> {
        if let Some(intra) = cfg.intra_threads {
            builder = builder.with_intra_threads(intra)?;
        }
        if let Some(inter) = cfg.inter_threads {
            builder = builder.with_inter_threads(inter)?;
        }
        if let Some(level) = cfg.optimization_level {
            use ort::session::builder::GraphOptimizationLevel as GOL;
            let mapped = match level {
                OrtGraphOptimizationLevel::DisableAll => GOL::Disable,
                OrtGraphOptimizationLevel::Level1 => GOL::Level1,
                OrtGraphOptimizationLevel::Level2 => GOL::Level2,
                OrtGraphOptimizationLevel::Level3 => GOL::Level3,
            };
            builder = builder.with_optimization_level(mapped)?;
        }
        let log_level = match cfg.log_severity_level {
            Some(0) => LogLevel::Verbose,
            Some(1) => LogLevel::Info,
            Some(2) => LogLevel::Warning,
            Some(4) => LogLevel::Fatal,
            _ => LogLevel::Error,
        };
        builder.with_log_level(log_level)
    }
}
