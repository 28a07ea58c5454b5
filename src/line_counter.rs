//! Main LineCounter implementation
//!
//! Drives one frame at a time through the tracker, the per-track
//! trajectories, the crossing detector and the session tallies.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::centroid_tracker::{CentroidTracker, TrackedObject};
use crate::config::CounterConfig;
use crate::crossing::{CountingLine, CrossingDetector, CrossingEvent};
use crate::detection::Detection;
use crate::error::TrackError;
use crate::session::{SessionAggregate, SessionRecord};

/// Everything a renderer needs about one processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub objects: BTreeMap<usize, TrackedObject>,
    pub events: Vec<CrossingEvent>,
}

/// LineCounter - tracks detections and counts crossings of one horizontal line
///
/// Every mutating call takes `&mut self`; a host sharing the counter across
/// threads wraps it in its own lock and readers only see completed frames.
#[derive(Debug)]
pub struct LineCounter {
    tracker: CentroidTracker,
    detector: CrossingDetector,
    session: SessionAggregate,
    frame_count: usize,
}

impl LineCounter {
    /// Create a LineCounter with default tuning and the line at `line_y`.
    ///
    /// # Example
    /// ```
    /// use crosstrack_rs::line_counter::LineCounter;
    /// let counter = LineCounter::new(300);
    /// assert_eq!(counter.session().net(), 0);
    /// ```
    pub fn new(line_y: i32) -> Self {
        let config = CounterConfig::default().with_line_y(line_y);
        Self::build(&config)
    }

    pub fn from_config(config: &CounterConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &CounterConfig) -> Self {
        Self {
            tracker: CentroidTracker::from_validated_config(config),
            detector: CrossingDetector::new(CountingLine::new(config.line_y)),
            session: SessionAggregate::new(),
            frame_count: 0,
        }
    }

    /// Start the tallies on an existing session instead of a fresh one.
    pub fn with_session(self, session: SessionAggregate) -> Self {
        Self { session, ..self }
    }

    /// Process the complete detection set of one frame.
    ///
    /// # Arguments
    /// * `detections` - All detections of the frame, possibly empty
    ///
    /// # Returns
    /// Live tracks after the update and the crossings that fired this frame
    pub fn process_frame(&mut self, detections: &[Detection]) -> FrameOutput {
        self.frame_count += 1;

        // Step 1: Identity update
        let objects = self.tracker.update(detections);

        // Step 2: Every live track records its position, matched or not
        for track in self.tracker.tracks_mut() {
            track.record_position();
        }

        // Step 3: Crossing check per track
        let mut events = Vec::new();
        for track in self.tracker.tracks_mut() {
            if let Some(event) = self.detector.evaluate(track) {
                info!(
                    frame = self.frame_count,
                    track_id = event.track_id,
                    class_id = event.class_id,
                    direction = ?event.direction,
                    "line crossed"
                );
                self.session.record(&event);
                events.push(event);
            }
        }

        FrameOutput { objects, events }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn session(&self) -> &SessionAggregate {
        &self.session
    }

    pub fn counting_line(&self) -> CountingLine {
        self.detector.line()
    }

    /// Close the session now and return its record.
    pub fn snapshot(&mut self, mode: &str) -> SessionRecord {
        self.session.snapshot(mode, Utc::now())
    }

    /// Close the session now and write it as JSON into `dir`.
    pub fn save_session<P: AsRef<Path>>(
        &mut self,
        mode: &str,
        dir: P,
    ) -> Result<PathBuf, TrackError> {
        self.snapshot(mode).save(dir)
    }

    /// Replace the tallies with a fresh session. Live tracks and their
    /// crossing latches are kept.
    pub fn reset_session(&mut self) -> SessionAggregate {
        std::mem::take(&mut self.session)
    }
}
