use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use inkshape::core::{init_with_level, verbosity_level, Point, SequentialIds, UuidIds};
use inkshape::recognize::{
    extract_features, JobConfigError, JobIoError, RecognizeJob, StrokeFeatures,
};
use inkshape::smooth::{smooth_stroke, SmoothingConfig};
use log::info;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "inkshape",
    version,
    about = "Freehand stroke smoothing and shape recognition"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON tracing spans instead of plain log lines (needs the `tracing` feature).
    #[arg(long, global = true)]
    trace_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every stroke of a job and write a JSON report.
    Recognize {
        /// Job file (JSON).
        job: PathBuf,
        /// Report path; defaults to the job's `output_path`.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the job's minimum confidence.
        #[arg(long)]
        min_confidence: Option<f64>,
        /// Number shapes `shape-1`, `shape-2`, ... instead of random UUIDs.
        #[arg(long)]
        sequential_ids: bool,
    },
    /// Smooth every stroke of a job for display.
    Smooth {
        job: PathBuf,
        /// Output path; prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the spline resolution.
        #[arg(long)]
        resolution: Option<usize>,
    },
    /// Print the feature vector of every stroke as JSON.
    Features { job: PathBuf },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Job(#[from] JobIoError),
    #[error("invalid configuration: {0}")]
    Config(#[from] JobConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SmoothedStroke {
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_id: Option<String>,
    input_points: usize,
    points: Vec<Point>,
}

#[derive(Serialize)]
struct FeatureEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_id: Option<String>,
    features: StrokeFeatures,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.trace_json);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8, trace_json: bool) {
    if trace_json {
        inkshape::core::init_tracing(true);
    } else {
        let _ = init_with_level(verbosity_level(verbose));
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8, trace_json: bool) {
    if trace_json {
        eprintln!("warning: built without the `tracing` feature; using plain logs");
    }
    let _ = init_with_level(verbosity_level(verbose));
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Recognize {
            job,
            output,
            min_confidence,
            sequential_ids,
        } => {
            let mut job = RecognizeJob::load_json(&job)?;
            if let Some(min_confidence) = min_confidence {
                let cfg = job.recognition_config().with_min_confidence(min_confidence);
                job.recognition = Some(cfg);
            }
            job.validate()?;

            let report = if sequential_ids {
                job.run(&mut SequentialIds::default())
            } else {
                job.run(&mut UuidIds)
            };
            let path = output.unwrap_or_else(|| job.output_path());
            report.write_json(&path)?;
            info!("wrote report to {}", path.display());

            for (i, stroke) in report.strokes.iter().enumerate() {
                let label = stroke.stroke_id.as_deref().unwrap_or("-");
                match stroke.result.shape_type {
                    Some(t) => println!("{i} {label}: {t} ({:.3})", stroke.result.confidence),
                    None => println!(
                        "{i} {label}: not recognized ({:.3})",
                        stroke.result.confidence
                    ),
                }
            }
            println!(
                "recognized {}/{} strokes",
                report.recognized_count(),
                report.strokes.len()
            );
            Ok(())
        }
        Commands::Smooth {
            job,
            output,
            resolution,
        } => {
            let job = RecognizeJob::load_json(&job)?;
            let mut config = job.smoothing.clone().unwrap_or_default();
            if let Some(resolution) = resolution {
                config = config.with_resolution(resolution);
            }
            config.validate().map_err(JobConfigError::from)?;

            let smoothed = smooth_all(&job, &config);
            let json = serde_json::to_string_pretty(&smoothed)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    info!("wrote {} strokes to {}", smoothed.len(), path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Features { job } => {
            let job = RecognizeJob::load_json(&job)?;
            let entries: Vec<FeatureEntry> = job
                .strokes
                .iter()
                .map(|s| FeatureEntry {
                    stroke_id: s.stroke_id().map(str::to_owned),
                    features: extract_features(s.points()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
    }
}

fn smooth_all(job: &RecognizeJob, config: &SmoothingConfig) -> Vec<SmoothedStroke> {
    job.strokes
        .iter()
        .map(|s| SmoothedStroke {
            stroke_id: s.stroke_id().map(str::to_owned),
            input_points: s.points().len(),
            points: smooth_stroke(s.points(), config),
        })
        .collect()
}
