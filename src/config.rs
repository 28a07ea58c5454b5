//! Session-wide tuning for the tracker and the counting line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// How unmatched tracks and detections are handled after greedy assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Only the larger side of the cost matrix is processed each frame: with
    /// at least as many tracks as detections, unmatched tracks age and spare
    /// detections are dropped; otherwise spare detections register and
    /// unmatched tracks do not age.
    #[default]
    ShapeExclusive,
    /// Unmatched tracks always age and unmatched detections always register.
    Independent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Frames a track may go unmatched before it is retired.
    #[serde(default = "default_max_disappeared")]
    pub max_disappeared: usize,

    /// Positions kept per track.
    #[serde(default = "default_trajectory_capacity")]
    pub trajectory_capacity: usize,

    /// Horizontal counting line, in input box coordinates.
    #[serde(default = "default_line_y")]
    pub line_y: i32,

    #[serde(default)]
    pub unmatched_policy: UnmatchedPolicy,
}

fn default_max_disappeared() -> usize {
    50
}

fn default_trajectory_capacity() -> usize {
    5
}

fn default_line_y() -> i32 {
    300
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            max_disappeared: default_max_disappeared(),
            trajectory_capacity: default_trajectory_capacity(),
            line_y: default_line_y(),
            unmatched_policy: UnmatchedPolicy::default(),
        }
    }
}

/// Crossing detection needs two points of history per track.
pub(crate) fn check_trajectory_capacity(trajectory_capacity: usize) -> Result<(), TrackError> {
    if trajectory_capacity < 2 {
        return Err(TrackError::InvalidConfig(format!(
            "trajectory_capacity must be at least 2, got {}",
            trajectory_capacity
        )));
    }
    Ok(())
}

impl CounterConfig {
    pub fn with_max_disappeared(self, max_disappeared: usize) -> Self {
        Self {
            max_disappeared,
            ..self
        }
    }

    pub fn with_trajectory_capacity(self, trajectory_capacity: usize) -> Self {
        Self {
            trajectory_capacity,
            ..self
        }
    }

    pub fn with_line_y(self, line_y: i32) -> Self {
        Self { line_y, ..self }
    }

    pub fn with_unmatched_policy(self, unmatched_policy: UnmatchedPolicy) -> Self {
        Self {
            unmatched_policy,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        check_trajectory_capacity(self.trajectory_capacity)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TrackError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TrackError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CounterConfig::default();
        assert_eq!(config.max_disappeared, 50);
        assert_eq!(config.trajectory_capacity, 5);
        assert_eq!(config.line_y, 300);
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::ShapeExclusive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CounterConfig::from_json_str(r#"{ "line_y": 240 }"#).unwrap();
        assert_eq!(config.line_y, 240);
        assert_eq!(config.max_disappeared, 50);
        assert_eq!(config.trajectory_capacity, 5);
    }

    #[test]
    fn test_policy_from_json() {
        let config =
            CounterConfig::from_json_str(r#"{ "unmatched_policy": "independent" }"#).unwrap();
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::Independent);
    }

    #[test]
    fn test_rejects_short_trajectory() {
        let err = CounterConfig::from_json_str(r#"{ "trajectory_capacity": 1 }"#).unwrap_err();
        assert!(matches!(err, TrackError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = CounterConfig::from_json_str("{ line_y: }").unwrap_err();
        assert!(matches!(err, TrackError::Serialization(_)));
    }

    #[test]
    fn test_builder() {
        let config = CounterConfig::default()
            .with_max_disappeared(3)
            .with_trajectory_capacity(8)
            .with_line_y(100)
            .with_unmatched_policy(UnmatchedPolicy::Independent);
        assert_eq!(config.max_disappeared, 3);
        assert_eq!(config.trajectory_capacity, 8);
        assert_eq!(config.line_y, 100);
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::Independent);
    }
}
