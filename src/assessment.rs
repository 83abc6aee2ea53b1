//! User-state assessment
//!
//! Maps aggregate signal values onto discrete levels:
//! - Cognitive load from pupil dilation
//! - Engagement and flow state from velocity and fixation duration
//! - Target difficulty from flow state

use crate::types::{CognitiveLoad, DifficultyLevel, FlowState};

/// Dilation below this is low cognitive load
pub const PUPIL_DILATION_THRESHOLD: f64 = 0.1;

/// Width of the medium cognitive load band above the dilation threshold
pub const COGNITIVE_LOAD_THRESHOLD: f64 = 0.5;

pub const VELOCITY_ENGAGEMENT_WEIGHT: f64 = 0.5;
pub const FIXATION_ENGAGEMENT_WEIGHT: f64 = 0.3;

/// Engagement below this is boredom
pub const BOREDOM_CEILING: f64 = 0.3;

/// Engagement above this is anxiety
pub const ANXIETY_FLOOR: f64 = 0.7;

/// Classify cognitive load from an average dilation factor
pub fn cognitive_load(dilation_factor: f64) -> CognitiveLoad {
    if dilation_factor < PUPIL_DILATION_THRESHOLD {
        CognitiveLoad::Low
    } else if dilation_factor < PUPIL_DILATION_THRESHOLD + COGNITIVE_LOAD_THRESHOLD {
        CognitiveLoad::Medium
    } else {
        CognitiveLoad::High
    }
}

/// Weighted engagement: `velocity * 0.5 + fixation_duration * 0.3`
pub fn engagement_level(velocity: f64, fixation_duration: f64) -> f64 {
    velocity * VELOCITY_ENGAGEMENT_WEIGHT + fixation_duration * FIXATION_ENGAGEMENT_WEIGHT
}

pub fn flow_state(engagement: f64) -> FlowState {
    if engagement < BOREDOM_CEILING {
        FlowState::Boredom
    } else if engagement > ANXIETY_FLOOR {
        FlowState::Anxiety
    } else {
        FlowState::Flow
    }
}

/// Difficulty to apply for a given flow state
pub fn difficulty_for(flow: FlowState) -> DifficultyLevel {
    match flow {
        FlowState::Boredom => DifficultyLevel::Medium,
        FlowState::Anxiety => DifficultyLevel::Easy,
        FlowState::Flow => DifficultyLevel::Hard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cognitive_load_bands() {
        assert_eq!(cognitive_load(0.05), CognitiveLoad::Low);
        assert_eq!(cognitive_load(0.1), CognitiveLoad::Medium);
        assert_eq!(cognitive_load(0.4), CognitiveLoad::Medium);
        assert_eq!(cognitive_load(0.6), CognitiveLoad::High);
        assert_eq!(cognitive_load(3.2), CognitiveLoad::High);
    }

    #[test]
    fn test_engagement_level() {
        // 0.5 * 0.5 + 0.3 * 0.3 = 0.34
        assert!((engagement_level(0.5, 0.3) - 0.34).abs() < 1e-12);
        assert_eq!(engagement_level(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_flow_state_boundaries() {
        assert_eq!(flow_state(0.1), FlowState::Boredom);
        assert_eq!(flow_state(0.3), FlowState::Flow);
        assert_eq!(flow_state(0.7), FlowState::Flow);
        assert_eq!(flow_state(0.71), FlowState::Anxiety);
    }

    #[test]
    fn test_difficulty_mapping() {
        assert_eq!(difficulty_for(FlowState::Boredom), DifficultyLevel::Medium);
        assert_eq!(difficulty_for(FlowState::Flow), DifficultyLevel::Hard);
        assert_eq!(difficulty_for(FlowState::Anxiety), DifficultyLevel::Easy);
    }
}
