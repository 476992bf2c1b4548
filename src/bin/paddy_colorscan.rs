//! Command-line interface for paddy_colorscan
//!
//! Prints JSON results to stdout and a human-readable summary to stderr.

use clap::{Parser, Subcommand, ValueEnum};
use paddy_colorscan::service::{AnalysisService, ErrorResponse, LocalImageStore, Upload};
use paddy_colorscan::{
    analyze_grain_pixels, analyze_leaf_pixels, classify_leaf_color, estimate_moisture,
    image_loader, AnalysisConfig, AnalysisError, LeafAnalysis, MoistureEstimator, RgbTriple,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paddy-colorscan")]
#[command(about = "Estimate rice grain moisture and leaf nitrogen level from photos")]
struct Args {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a leaf photo against the leaf color chart
    Leaf { image: PathBuf },

    /// Estimate moisture of a grain photo
    Grain { image: PathBuf },

    /// Classify a color given as hex, e.g. "#9FC765"
    Classify { color: String },

    /// Estimate moisture from channel means
    Moisture {
        #[arg(long)]
        red: f64,
        #[arg(long)]
        green: f64,
    },

    /// Run the upload flow, storing the original under the configured root
    Upload {
        #[arg(value_enum)]
        kind: UploadKind,
        image: PathBuf,
    },

    /// Write the default configuration to a JSON file
    Config { output: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum UploadKind {
    Leaf,
    Grain,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AnalysisError> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    match args.command {
        Command::Leaf { image } => {
            let pixels = image_loader::load_image(&image)?;
            let analysis = analyze_leaf_pixels(&pixels, config.leaf.region)?;
            print_json(&analysis)?;
            print_leaf_summary(&analysis);
        }
        Command::Grain { image } => {
            let pixels = image_loader::load_image(&image)?;
            let estimator = MoistureEstimator::with_calibration(config.moisture)?;
            let result = analyze_grain_pixels(&pixels, &estimator, config.grain.region)?;
            print_json(&result)?;
            eprintln!();
            eprintln!("Grain Moisture Summary:");
            eprintln!("  Moisture: {}", result.percent_label());
            eprintln!(
                "  Range: {:.0}%-{:.0}%",
                result.clamped_range[0], result.clamped_range[1]
            );
        }
        Command::Classify { color } => {
            let rgb = RgbTriple::from_hex(&color)?;
            let classification = classify_leaf_color(rgb);
            let analysis = LeafAnalysis::from_classification(&classification, rgb);
            print_json(&analysis)?;
            eprintln!("  Distance to reference: {:.2}", classification.distance);
        }
        Command::Moisture { red, green } => {
            if !(red.is_finite() && green.is_finite() && red >= 0.0 && green >= 0.0) {
                return Err(AnalysisError::InvalidParameter {
                    parameter: "red/green".to_string(),
                    value: format!("{}/{}", red, green),
                });
            }
            println!("{}", estimate_moisture(red, green));
        }
        Command::Upload { kind, image } => {
            let upload = read_upload(&image)?;
            let store = LocalImageStore::from_config(&config.storage);
            info!(root = %store.root().display(), "using local image store");
            let service = AnalysisService::new(config, store)?;

            let outcome = match kind {
                UploadKind::Leaf => service.handle_leaf_upload(&upload).and_then(|r| print_json(&r)),
                UploadKind::Grain => service.handle_grain_upload(&upload).and_then(|r| print_json(&r)),
            };
            if let Err(err) = outcome {
                print_json(&ErrorResponse::from(&err))?;
                return Err(err);
            }
        }
        Command::Config { output } => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AnalysisError::config(format!("Failed to create {}", parent.display()), e)
                })?;
            }
            config.to_json_file(&output)?;
            info!("Configuration saved to {}", output.display());
        }
    }

    Ok(())
}

fn read_upload(path: &Path) -> Result<Upload, AnalysisError> {
    let bytes = std::fs::read(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to read {}", path.display()), e)
    })?;
    let content_type = image_loader::ImageFormat::from_extension(path).map(|f| f.mime_type());
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    Upload::new(file_name, content_type, bytes)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AnalysisError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AnalysisError::ProcessingError {
            message: format!("Failed to serialize result: {}", e),
        })?;
    println!("{}", json);
    Ok(())
}

fn print_leaf_summary(analysis: &LeafAnalysis) {
    eprintln!();
    eprintln!("Leaf Color Summary:");
    eprintln!("  Level: {} of 6", analysis.color_level);
    eprintln!("  Average RGB: {} ({})", analysis.avg_rgb, analysis.avg_rgb.to_hex());
    eprintln!("  Recommendation: {}", analysis.prediction());
    eprintln!("  {}", analysis.description);
}
