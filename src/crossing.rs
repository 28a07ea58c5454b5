//! Directional crossing of a horizontal counting line.
//!
//! A track crosses downward ("entry") when its previous y lies above the line
//! and its current y lies on or below it, and upward ("exit") in the mirrored
//! case. Each direction is latched on the track, so a track contributes at
//! most one entry and one exit over its lifetime.

use serde::{Deserialize, Serialize};

use crate::track::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingDirection {
    /// Downward, `previous_y < line_y <= current_y`
    Entry,
    /// Upward, `previous_y > line_y >= current_y`
    Exit,
}

/// A crossing that fired during the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingEvent {
    pub track_id: usize,
    pub class_id: usize,
    pub direction: CrossingDirection,
}

/// Horizontal line `y = line_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountingLine {
    pub line_y: i32,
}

impl CountingLine {
    pub fn new(line_y: i32) -> Self {
        Self { line_y }
    }

    /// Direction of the step from `previous_y` to `current_y`, if it crosses.
    pub fn classify(&self, previous_y: i32, current_y: i32) -> Option<CrossingDirection> {
        if previous_y < self.line_y && self.line_y <= current_y {
            Some(CrossingDirection::Entry)
        } else if previous_y > self.line_y && self.line_y >= current_y {
            Some(CrossingDirection::Exit)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingDetector {
    line: CountingLine,
}

impl CrossingDetector {
    pub fn new(line: CountingLine) -> Self {
        Self { line }
    }

    pub fn line(&self) -> CountingLine {
        self.line
    }

    /// Check the last step of `track`'s trajectory and latch the matching flag.
    ///
    /// Returns `None` when the trajectory holds fewer than two points, when
    /// the step does not cross, or when that direction already fired.
    pub fn evaluate(&self, track: &mut Track) -> Option<CrossingEvent> {
        let (previous, current) = track.get_trajectory().last_two()?;
        let direction = self.line.classify(previous.y, current.y)?;

        match direction {
            CrossingDirection::Entry if !track.has_entered() => track.mark_entered(),
            CrossingDirection::Exit if !track.has_exited() => track.mark_exited(),
            _ => return None,
        }

        Some(CrossingEvent {
            track_id: track.get_track_id(),
            class_id: track.get_class_id(),
            direction,
        })
    }
}
