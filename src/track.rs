use crate::{
    rect::Centroid,
    trajectory::Trajectory,
};
use std::fmt::Debug;

/*----------------------------------------------------------------------------
Crossing flags
----------------------------------------------------------------------------*/

/// One-shot latches for the two crossing directions. Never cleared once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossingFlags {
    pub entered: bool,
    pub exited: bool,
}

/*----------------------------------------------------------------------------
Track struct
----------------------------------------------------------------------------*/

impl Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Track {{ track_id: {}, centroid: ({}, {}), class_id: {}, disappeared: {}, history_len: {}, flags: {:?} }}",
            self.track_id, self.centroid.x, self.centroid.y, self.class_id, self.disappeared, self.trajectory.len(), self.flags
        )
    }
}

#[derive(Clone)]
pub struct Track {
    track_id: usize,
    centroid: Centroid,
    class_id: usize,
    disappeared: usize,
    trajectory: Trajectory,
    flags: CrossingFlags,
}

impl Track {
    pub(crate) fn new(
        track_id: usize,
        centroid: Centroid,
        class_id: usize,
        trajectory_capacity: usize,
    ) -> Self {
        Self {
            track_id,
            centroid,
            class_id,
            disappeared: 0,
            trajectory: Trajectory::new(trajectory_capacity),
            flags: CrossingFlags::default(),
        }
    }

    pub fn get_track_id(&self) -> usize {
        self.track_id
    }

    pub fn get_centroid(&self) -> Centroid {
        self.centroid
    }

    pub fn get_class_id(&self) -> usize {
        self.class_id
    }

    pub fn get_disappeared(&self) -> usize {
        self.disappeared
    }

    pub fn get_trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn get_flags(&self) -> CrossingFlags {
        self.flags
    }

    pub fn has_entered(&self) -> bool {
        self.flags.entered
    }

    pub fn has_exited(&self) -> bool {
        self.flags.exited
    }

    pub(crate) fn update(&mut self, centroid: Centroid, class_id: usize) {
        self.centroid = centroid;
        self.class_id = class_id;
        self.disappeared = 0;
    }

    /// Bumps the disappearance counter and returns the new value.
    pub(crate) fn mark_missed(&mut self) -> usize {
        self.disappeared += 1;
        self.disappeared
    }

    /// Appends the current centroid to the trajectory.
    pub(crate) fn record_position(&mut self) {
        self.trajectory.push(self.centroid);
    }

    pub(crate) fn mark_entered(&mut self) {
        self.flags.entered = true;
    }

    pub(crate) fn mark_exited(&mut self) {
        self.flags.exited = true;
    }

    #[cfg(test)]
    pub(crate) fn with_history(
        track_id: usize,
        class_id: usize,
        points: &[Centroid],
    ) -> Self {
        let mut track = Self::new(
            track_id,
            points.last().copied().unwrap_or_else(|| Centroid::new(0, 0)),
            class_id,
            points.len().max(2),
        );
        for p in points {
            track.trajectory.push(*p);
        }
        track
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.track_id == other.track_id
    }
}
