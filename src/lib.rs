//! Synheart Gaze - Threshold classifiers for XR eye-tracking signals
//!
//! Gaze flags eye-tracking events from plain numeric sequences: saccades and
//! fixations from velocity and fixation samples, biofeedback and pupillometry
//! peaks, and the mean performance used for difficulty adjustment.
//!
//! ## Modules
//!
//! - **Classifier**: stateless threshold checks bound to a [`GazeConfig`]
//! - **Report**: run every enabled classifier over a [`SampleSet`] into a JSON report
//! - **Assessment**: cognitive load, flow state and difficulty levels

pub mod assessment;
pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod report;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use classifier::{GazeClassifier, FIXED_SIGNAL_THRESHOLD};
pub use config::GazeConfig;
pub use diagnostics::{init_logging, Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use error::{ClassifyError, ConfigError, GazeError};
pub use report::ReportEncoder;
pub use types::{GazeReport, Metric, Operation, Outcome, SampleSet};

/// Gaze version embedded in all reports
pub const GAZE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "synheart-gaze";

/// Run every enabled classifier over a JSON sample set and return the report JSON.
///
/// # Example
/// ```ignore
/// let report = classify_json(r#"{"velocity": [0.3, 0.6]}"#, &GazeConfig::default())?;
/// ```
pub fn classify_json(samples_json: &str, config: &GazeConfig) -> Result<String, GazeError> {
    let samples: SampleSet = serde_json::from_str(samples_json)?;
    let classifier = GazeClassifier::new(config);
    ReportEncoder::new().encode_to_json(&classifier, &samples)
}
