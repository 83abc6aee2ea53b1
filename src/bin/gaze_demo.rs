//! Gaze demo - runs every classifier over literal sample arrays
//!
//! The last call uses an empty pupillometry array to show the error path:
//! one ERROR line on stderr and a `false` result.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use synheart_gaze::{
    init_logging, GazeClassifier, GazeConfig, GazeError, ReportEncoder, SampleSet, GAZE_VERSION,
};

/// Gaze demo - threshold classifiers for XR eye-tracking signals
#[derive(Parser)]
#[command(name = "gaze-demo")]
#[command(author = "Synheart AI Inc")]
#[command(version = GAZE_VERSION)]
#[command(about = "Run the gaze classifiers on demo samples", long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also print the JSON session report
    #[arg(long)]
    report: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GazeError> {
    let config = match &cli.config {
        Some(path) => GazeConfig::load(path)?,
        None => GazeConfig::default(),
    };

    let samples = SampleSet {
        velocity: vec![0.3, 0.4, 0.5, 0.6],
        fixation: vec![0.1, 0.2, 0.3, 0.4],
        performance: vec![0.5, 0.6, 0.7, 0.8],
        biofeedback: vec![0.4, 0.5, 0.6, 0.7],
        pupillometry: vec![],
    };

    let classifier = GazeClassifier::new(&config);

    tracing::info!("Saccade detected: {}", classifier.detect_saccade(&samples.velocity));
    tracing::info!("Fixation detected: {}", classifier.detect_fixation(&samples.fixation));
    tracing::info!("Difficulty adjustment: {}", classifier.adjust_difficulty(&samples.performance));
    tracing::info!("Biofeedback detected: {}", classifier.detect_biofeedback(&samples.biofeedback));
    tracing::info!(
        "Pupillometry analysis: {}",
        classifier.analyze_pupillometry(&samples.pupillometry)
    );

    if cli.report {
        let report = ReportEncoder::new().encode(&classifier, &samples);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
