//! Session report encoding
//!
//! Runs every enabled classifier over a [`SampleSet`] and packages the
//! outcomes into a [`GazeReport`]. Empty inputs are recorded as
//! `empty_input` outcomes rather than reported through diagnostics.

use chrono::Utc;
use uuid::Uuid;

use crate::assessment;
use crate::classifier::{mean, GazeClassifier};
use crate::error::GazeError;
use crate::types::{
    DifficultySection, EyeMovementSection, GazeReport, Metric, Outcome, PupillometrySection,
    ReportProducer, SampleSet,
};
use crate::{GAZE_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for session reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Classify every sequence in `samples` according to the enabled features
    pub fn encode(&self, classifier: &GazeClassifier<'_>, samples: &SampleSet) -> GazeReport {
        let config = classifier.config();

        let eye_movement = EyeMovementSection {
            saccade: classifier.try_detect_saccade(&samples.velocity).into(),
            fixation: classifier.try_detect_fixation(&samples.fixation).into(),
        };

        let difficulty = config
            .dynamic_difficulty_adjustment
            .then(|| build_difficulty(classifier, samples));

        let biofeedback: Option<Outcome<bool>> = config
            .real_time_biofeedback
            .then(|| classifier.try_detect_biofeedback(&samples.biofeedback).into());

        let pupillometry = config.pupillometry_analysis.then(|| PupillometrySection {
            dilated: classifier
                .try_analyze_pupillometry(&samples.pupillometry)
                .into(),
            cognitive_load: mean(&samples.pupillometry).map(assessment::cognitive_load),
        });

        tracing::debug!(
            "Encoded report: saccade={:?} fixation={:?}",
            eye_movement.saccade.value(),
            eye_movement.fixation.value()
        );

        GazeReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: GAZE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            eye_movement,
            difficulty,
            biofeedback,
            pupillometry,
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(
        &self,
        classifier: &GazeClassifier<'_>,
        samples: &SampleSet,
    ) -> Result<String, GazeError> {
        let report = self.encode(classifier, samples);
        Ok(serde_json::to_string(&report)?)
    }
}

fn build_difficulty(classifier: &GazeClassifier<'_>, samples: &SampleSet) -> DifficultySection {
    let mean_performance: Outcome<Metric> = classifier
        .try_adjust_difficulty(&samples.performance)
        .map(Metric)
        .into();

    let engagement_level = match (mean(&samples.velocity), mean(&samples.fixation)) {
        (Some(velocity), Some(fixation)) => Some(assessment::engagement_level(velocity, fixation)),
        _ => None,
    };
    let flow_state = engagement_level.map(assessment::flow_state);

    DifficultySection {
        mean_performance,
        engagement_level: engagement_level.map(Metric),
        flow_state,
        level: flow_state.map(assessment::difficulty_for),
    }
}
