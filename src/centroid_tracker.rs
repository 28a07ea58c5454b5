//! Centroid tracker
//!
//! Keeps a persistent identity for every object across frames by matching the
//! centroids of new detections to the last known centroid of each live track.

use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::assoc::{distance_batch, greedy_assignment};
use crate::config::{check_trajectory_capacity, CounterConfig, UnmatchedPolicy};
use crate::detection::Detection;
use crate::error::TrackError;
use crate::rect::Centroid;
use crate::track::Track;

/// Per-frame view of a live track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedObject {
    pub centroid: Centroid,
    pub class_id: usize,
}

/*-----------------------------------------------------------------------------
CentroidTracker
-----------------------------------------------------------------------------*/

#[derive(Debug)]
pub struct CentroidTracker {
    max_disappeared: usize,
    trajectory_capacity: usize,
    unmatched_policy: UnmatchedPolicy,

    next_track_id: usize,
    tracks: BTreeMap<usize, Track>,
}

impl CentroidTracker {
    /// Create a tracker that reproduces the shape-exclusive unmatched handling.
    ///
    /// # Arguments
    /// * `max_disappeared` - Frames a track may go unmatched before removal
    /// * `trajectory_capacity` - Positions kept per track, at least 2
    ///
    /// # Example
    /// ```
    /// use crosstrack_rs::centroid_tracker::CentroidTracker;
    /// let tracker = CentroidTracker::new(50, 5).unwrap();
    /// assert!(tracker.is_empty());
    /// assert!(CentroidTracker::new(50, 1).is_err());
    /// ```
    pub fn new(max_disappeared: usize, trajectory_capacity: usize) -> Result<Self, TrackError> {
        check_trajectory_capacity(trajectory_capacity)?;
        Ok(Self::build(max_disappeared, trajectory_capacity))
    }

    pub fn from_config(config: &CounterConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self::from_validated_config(config))
    }

    /// Caller has already run `CounterConfig::validate`.
    pub(crate) fn from_validated_config(config: &CounterConfig) -> Self {
        Self::build(config.max_disappeared, config.trajectory_capacity)
            .with_unmatched_policy(config.unmatched_policy)
    }

    fn build(max_disappeared: usize, trajectory_capacity: usize) -> Self {
        Self {
            max_disappeared,
            trajectory_capacity,
            unmatched_policy: UnmatchedPolicy::ShapeExclusive,
            next_track_id: 0,
            tracks: BTreeMap::new(),
        }
    }

    pub fn with_unmatched_policy(self, unmatched_policy: UnmatchedPolicy) -> Self {
        Self {
            unmatched_policy,
            ..self
        }
    }

    /// Update the tracker with the complete detection set of one frame.
    ///
    /// # Arguments
    /// * `detections` - All detections of the frame, possibly empty
    ///
    /// # Returns
    /// Every live track after the update, keyed by track id
    pub fn update(&mut self, detections: &[Detection]) -> BTreeMap<usize, TrackedObject> {
        // Step 1: Nothing detected, every track ages
        if detections.is_empty() {
            let track_ids: Vec<usize> = self.tracks.keys().copied().collect();
            for track_id in track_ids {
                self.age_track(track_id);
            }
            return self.objects();
        }

        // Step 2: Nothing tracked, every detection starts a track
        if self.tracks.is_empty() {
            for det in detections {
                self.register(det.centroid(), det.get_class_id());
            }
            return self.objects();
        }

        // Step 3: Greedy association on centroid distance
        let track_ids: Vec<usize> = self.tracks.keys().copied().collect();
        let track_centroids: Vec<Centroid> =
            self.tracks.values().map(|t| t.get_centroid()).collect();
        let det_centroids: Vec<Centroid> = detections.iter().map(|d| d.centroid()).collect();

        let cost_matrix = distance_batch(&track_centroids, &det_centroids);
        let result = greedy_assignment(&cost_matrix);
        debug!(
            tracks = track_ids.len(),
            detections = detections.len(),
            matched = result.matches.len(),
            "associated frame"
        );

        for &(row, col) in &result.matches {
            if let Some(track) = self.tracks.get_mut(&track_ids[row]) {
                track.update(det_centroids[col], detections[col].get_class_id());
            }
        }

        // Step 4: Unmatched rows and columns
        let (age_tracks, register_dets) = match self.unmatched_policy {
            UnmatchedPolicy::ShapeExclusive => {
                let tracks_dominate = cost_matrix.nrows() >= cost_matrix.ncols();
                (tracks_dominate, !tracks_dominate)
            }
            UnmatchedPolicy::Independent => (true, true),
        };

        if age_tracks {
            for &row in &result.unmatched_tracks {
                self.age_track(track_ids[row]);
            }
        }

        if register_dets {
            for &col in &result.unmatched_detections {
                self.register(det_centroids[col], detections[col].get_class_id());
            }
        }

        self.objects()
    }

    /// Snapshot of the live tracks, keyed by track id.
    pub fn objects(&self) -> BTreeMap<usize, TrackedObject> {
        self.tracks
            .iter()
            .map(|(&id, t)| {
                (
                    id,
                    TrackedObject {
                        centroid: t.get_centroid(),
                        class_id: t.get_class_id(),
                    },
                )
            })
            .collect()
    }

    pub fn get_track(&self, track_id: usize) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Live tracks in creation order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub(crate) fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.values_mut()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Id the next registered track will receive.
    pub fn next_track_id(&self) -> usize {
        self.next_track_id
    }

    pub fn max_disappeared(&self) -> usize {
        self.max_disappeared
    }

    pub fn trajectory_capacity(&self) -> usize {
        self.trajectory_capacity
    }

    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.unmatched_policy
    }

    // =========================================================================
    // Internal methods
    // =========================================================================

    fn register(&mut self, centroid: Centroid, class_id: usize) -> usize {
        let track_id = self.next_track_id;
        self.next_track_id += 1;
        self.tracks.insert(
            track_id,
            Track::new(track_id, centroid, class_id, self.trajectory_capacity),
        );
        debug!(track_id, class_id, x = centroid.x, y = centroid.y, "registered track");
        track_id
    }

    fn deregister(&mut self, track_id: usize) {
        match self.tracks.remove(&track_id) {
            Some(track) => {
                debug!(track_id, class_id = track.get_class_id(), "deregistered track");
            }
            None => {
                error!(track_id, "deregister called for an unknown track");
                debug_assert!(false, "deregister called for unknown track {}", track_id);
            }
        }
    }

    fn age_track(&mut self, track_id: usize) {
        let missed = match self.tracks.get_mut(&track_id) {
            Some(track) => track.mark_missed(),
            None => return,
        };
        if missed > self.max_disappeared {
            self.deregister(track_id);
        }
    }
}
