//! Threshold classifiers
//!
//! Each operation comes in two forms:
//! - `try_*` returns `Result<_, ClassifyError>` and never logs;
//! - the plain form reports the error once through the injected
//!   [`Diagnostics`] sink and returns `false` / `0.0`.

use std::fmt;
use std::sync::Arc;

use crate::config::GazeConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::ClassifyError;
use crate::types::Operation;

/// Fixed threshold used by biofeedback and pupillometry detection.
///
/// Not driven by configuration, unlike the velocity and fixation thresholds.
pub const FIXED_SIGNAL_THRESHOLD: f64 = 0.5;

/// Stateless classifier bound to a shared configuration
#[derive(Clone)]
pub struct GazeClassifier<'a> {
    config: &'a GazeConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl fmt::Debug for GazeClassifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GazeClassifier")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> GazeClassifier<'a> {
    /// Create a classifier that reports failures through `tracing`
    pub fn new(config: &'a GazeConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingDiagnostics))
    }

    /// Create a classifier with a custom diagnostics sink
    pub fn with_diagnostics(config: &'a GazeConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    /// The configuration this classifier reads thresholds from
    pub fn config(&self) -> &'a GazeConfig {
        self.config
    }

    // ------------------------------------------------------------------------
    // Checked forms
    // ------------------------------------------------------------------------

    /// True iff any sample is strictly greater than the velocity threshold
    pub fn try_exceeds_velocity_threshold(&self, samples: &[f64]) -> Result<bool, ClassifyError> {
        require_samples(Operation::ExceedsVelocityThreshold, samples)?;
        Ok(any_exceeds(samples, self.config.velocity_threshold))
    }

    /// Saccade detection: same rule as the velocity-threshold check
    pub fn try_detect_saccade(&self, samples: &[f64]) -> Result<bool, ClassifyError> {
        require_samples(Operation::DetectSaccade, samples)?;
        self.try_exceeds_velocity_threshold(samples)
    }

    /// True iff any sample is strictly greater than the fixation threshold
    pub fn try_detect_fixation(&self, samples: &[f64]) -> Result<bool, ClassifyError> {
        require_samples(Operation::DetectFixation, samples)?;
        Ok(any_exceeds(samples, self.config.fixation_threshold))
    }

    /// Arithmetic mean of the performance samples
    pub fn try_adjust_difficulty(&self, samples: &[f64]) -> Result<f64, ClassifyError> {
        mean(samples).ok_or(ClassifyError::EmptyInput(Operation::AdjustDifficulty))
    }

    pub fn try_detect_biofeedback(&self, samples: &[f64]) -> Result<bool, ClassifyError> {
        require_samples(Operation::DetectBiofeedback, samples)?;
        Ok(any_exceeds(samples, FIXED_SIGNAL_THRESHOLD))
    }

    pub fn try_analyze_pupillometry(&self, samples: &[f64]) -> Result<bool, ClassifyError> {
        require_samples(Operation::AnalyzePupillometry, samples)?;
        Ok(any_exceeds(samples, FIXED_SIGNAL_THRESHOLD))
    }

    // ------------------------------------------------------------------------
    // Compatibility forms
    // ------------------------------------------------------------------------

    pub fn exceeds_velocity_threshold(&self, samples: &[f64]) -> bool {
        self.recover(self.try_exceeds_velocity_threshold(samples))
    }

    pub fn detect_saccade(&self, samples: &[f64]) -> bool {
        self.recover(self.try_detect_saccade(samples))
    }

    pub fn detect_fixation(&self, samples: &[f64]) -> bool {
        self.recover(self.try_detect_fixation(samples))
    }

    /// Mean of the samples, or `0.0` for empty input
    pub fn adjust_difficulty(&self, samples: &[f64]) -> f64 {
        self.recover(self.try_adjust_difficulty(samples))
    }

    pub fn detect_biofeedback(&self, samples: &[f64]) -> bool {
        self.recover(self.try_detect_biofeedback(samples))
    }

    pub fn analyze_pupillometry(&self, samples: &[f64]) -> bool {
        self.recover(self.try_analyze_pupillometry(samples))
    }

    fn recover<T: Default>(&self, result: Result<T, ClassifyError>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.diagnostics.operation_failed(e.operation(), &e);
                T::default()
            }
        }
    }
}

/// Arithmetic mean with left-to-right summation, `None` for an empty slice
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().sum();
    Some(sum / samples.len() as f64)
}

fn require_samples(operation: Operation, samples: &[f64]) -> Result<(), ClassifyError> {
    if samples.is_empty() {
        return Err(ClassifyError::EmptyInput(operation));
    }
    Ok(())
}

// NaN never compares greater, so NaN samples are skipped
fn any_exceeds(samples: &[f64], threshold: f64) -> bool {
    samples.iter().any(|&sample| sample > threshold)
}
