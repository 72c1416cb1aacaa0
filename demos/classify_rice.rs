//! Rice Variety Classification Example
//!
//! This example loads the rice classifier and prints the ranked varieties for
//! each image given on the command line.
//!
//! Usage:
//! ```
//! cargo run --example classify_rice -- --model-path <path_to_model> <image_paths>...
//! ```
//!
//! A JSON configuration can replace `--model-path`:
//! ```
//! cargo run --example classify_rice -- --config pipeline.json <image_paths>...
//! ```

use clap::Parser;
use grain_palette::core::init_tracing;
use grain_palette::prelude::*;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Command-line arguments for the rice classification example
#[derive(Parser)]
#[command(name = "classify_rice")]
#[command(about = "Rice Variety Classification Example - ranks rice varieties for grain images")]
struct Args {
    /// Path to the ONNX model file
    #[arg(short, long)]
    model_path: Option<PathBuf>,

    /// Path to a JSON pipeline configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of predictions to show per image
    #[arg(short = 'k', long, default_value_t = 3)]
    top: usize,

    /// Print results as JSON instead of log lines
    #[arg(long)]
    json: bool,

    /// Image file paths to process
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::new(),
    };
    if let Some(model_path) = args.model_path {
        config.model_path = Some(model_path);
    }
    if config.model_path.is_none() {
        error!("No model given; pass --model-path or a --config with model_path");
        return Err("No model given".into());
    }

    info!("Loading rice classifier '{}'", config.resolved_model_name());
    let pipeline = ClassificationPipelineBuilder::new()
        .config(config)
        .load_on_build(true)
        .build()?;

    if pipeline.state() != PipelineState::Ready {
        let reason = pipeline.last_load_error().unwrap_or_default();
        error!("Model failed to load: {}", reason);
        return Err(reason.into());
    }

    for (i, path) in args.images.iter().enumerate() {
        info!(
            "Processing image {} of {}: {}",
            i + 1,
            args.images.len(),
            path.display()
        );

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Cannot read {}: {}", path.display(), e);
                continue;
            }
        };
        if !is_supported_image(&bytes) {
            warn!("{} is not a recognized image file", path.display());
            continue;
        }

        match pipeline.classify_bytes(&bytes) {
            Ok(classification) => {
                if args.json {
                    println!("{}", serde_json::to_string(&classification)?);
                } else {
                    for record in classification.iter().take(args.top) {
                        info!("   {}", record);
                    }
                }
            }
            Err(e) => error!("Classification failed for {}: {}", path.display(), e),
        }
    }

    info!("{}", pipeline.stats());
    Ok(())
}
