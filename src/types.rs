//! Core types for Synheart Gaze
//!
//! Operation identifiers, sample bundles, assessment levels and the session
//! report structures produced by the encoder.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::ClassifyError;

/// Identifies a classifier operation in errors and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ExceedsVelocityThreshold,
    DetectSaccade,
    DetectFixation,
    AdjustDifficulty,
    DetectBiofeedback,
    AnalyzePupillometry,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::ExceedsVelocityThreshold,
        Operation::DetectSaccade,
        Operation::DetectFixation,
        Operation::AdjustDifficulty,
        Operation::DetectBiofeedback,
        Operation::AnalyzePupillometry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ExceedsVelocityThreshold => "exceeds_velocity_threshold",
            Operation::DetectSaccade => "detect_saccade",
            Operation::DetectFixation => "detect_fixation",
            Operation::AdjustDifficulty => "adjust_difficulty",
            Operation::DetectBiofeedback => "detect_biofeedback",
            Operation::AnalyzePupillometry => "analyze_pupillometry",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One batch of input sequences, one per signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSet {
    /// Gaze velocity samples
    pub velocity: Vec<f64>,
    /// Fixation duration samples
    pub fixation: Vec<f64>,
    /// Task performance samples
    pub performance: Vec<f64>,
    /// Biofeedback signal samples
    pub biofeedback: Vec<f64>,
    /// Pupil diameter samples
    pub pupillometry: Vec<f64>,
}

/// Cognitive load level derived from pupil dilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveLoad {
    Low,
    Medium,
    High,
}

/// Flow-theory state derived from engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Boredom,
    Flow,
    Anxiety,
}

/// Target difficulty for the XR task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

/// Result of a single operation as recorded in a report.
///
/// Serialized as `{"status": "ok", "value": ...}` or `{"status": "empty_input"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok { value: T },
    EmptyInput,
}

impl<T> Outcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Ok { value } => Some(value),
            Outcome::EmptyInput => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }
}

impl<T> From<Result<T, ClassifyError>> for Outcome<T> {
    fn from(result: Result<T, ClassifyError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok { value },
            Err(ClassifyError::EmptyInput(_)) => Outcome::EmptyInput,
        }
    }
}

/// Report scalar that survives JSON for every `f64`.
///
/// Finite values are JSON numbers; NaN and the infinities are the strings
/// `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric(pub f64);

impl Metric {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric(value)
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Metric(value)),
            Raw::Text(text) => match text.as_str() {
                "NaN" => Ok(Metric(f64::NAN)),
                "inf" => Ok(Metric(f64::INFINITY)),
                "-inf" => Ok(Metric(f64::NEG_INFINITY)),
                other => Err(de::Error::custom(format!("invalid metric value: {other}"))),
            },
        }
    }
}

// ============================================================================
// Report structures
// ============================================================================

/// Session report covering every enabled classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazeReport {
    pub report_version: String,
    pub producer: ReportProducer,
    /// Computation time (RFC 3339, UTC)
    pub computed_at_utc: String,
    pub eye_movement: EyeMovementSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<DifficultySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biofeedback: Option<Outcome<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pupillometry: Option<PupillometrySection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeMovementSection {
    pub saccade: Outcome<bool>,
    pub fixation: Outcome<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySection {
    /// Mean of the performance samples
    pub mean_performance: Outcome<Metric>,
    /// Engagement over mean velocity and mean fixation, when both are available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_level: Option<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_state: Option<FlowState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<DifficultyLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PupillometrySection {
    pub dilated: Outcome<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cognitive_load: Option<CognitiveLoad>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_are_snake_case() {
        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }

    #[test]
    fn test_outcome_tagging() {
        let ok: Outcome<bool> = Outcome::Ok { value: true };
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"status":"ok","value":true}"#
        );

        let empty: Outcome<f64> = Outcome::EmptyInput;
        assert_eq!(
            serde_json::to_string(&empty).unwrap(),
            r#"{"status":"empty_input"}"#
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome =
            Outcome::from(Err::<bool, _>(ClassifyError::EmptyInput(Operation::DetectFixation)));
        assert_eq!(outcome, Outcome::EmptyInput);
        assert!(outcome.value().is_none());

        let outcome = Outcome::from(Ok::<f64, ClassifyError>(0.65));
        assert!(outcome.is_ok());
        assert_eq!(outcome.value(), Some(&0.65));
    }

    #[test]
    fn test_metric_keeps_non_finite_values() {
        let outcome = Outcome::Ok {
            value: Metric(f64::INFINITY),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"ok","value":"inf"}"#);

        let parsed: Outcome<Metric> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.value().map(|m| m.get()), Some(f64::INFINITY));

        let nan: Metric = serde_json::from_str(&serde_json::to_string(&Metric(f64::NAN)).unwrap()).unwrap();
        assert!(nan.get().is_nan());

        let neg: Metric = serde_json::from_str(r#""-inf""#).unwrap();
        assert_eq!(neg.get(), f64::NEG_INFINITY);

        let finite: Metric = serde_json::from_str("0.65").unwrap();
        assert_eq!(finite, Metric(0.65));
        assert_eq!(serde_json::to_string(&finite).unwrap(), "0.65");

        assert!(serde_json::from_str::<Metric>(r#""huge""#).is_err());
    }

    #[test]
    fn test_sample_set_missing_fields_default_to_empty() {
        let set: SampleSet = serde_json::from_str(r#"{"velocity": [0.1, 0.9]}"#).unwrap();
        assert_eq!(set.velocity, vec![0.1, 0.9]);
        assert!(set.fixation.is_empty());
        assert!(set.pupillometry.is_empty());
    }
}
