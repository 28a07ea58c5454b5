use crate::rect::Centroid;
use std::collections::VecDeque;

/*----------------------------------------------------------------------------
Trajectory struct
----------------------------------------------------------------------------*/

/// Bounded FIFO of the most recent centroids of one track, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    capacity: usize,
    points: VecDeque<Centroid>,
}

impl Trajectory {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "trajectory capacity must be positive");
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a centroid, dropping the oldest one when full.
    pub fn push(&mut self, centroid: Centroid) {
        while self.points.len() >= self.capacity.max(1) {
            self.points.pop_front();
        }
        self.points.push_back(centroid);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&Centroid> {
        self.points.back()
    }

    /// `(previous, current)` once at least two points are recorded.
    pub fn last_two(&self) -> Option<(Centroid, Centroid)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Centroid> {
        self.points.iter()
    }

    pub fn as_vec(&self) -> Vec<Centroid> {
        self.points.iter().copied().collect()
    }

    /// The last `n` consecutive point pairs, oldest pair first.
    pub fn recent_segments(&self, n: usize) -> Vec<(Centroid, Centroid)> {
        let len = self.points.len();
        let first = len.saturating_sub(n).max(1);
        (first..len)
            .map(|i| (self.points[i - 1], self.points[i]))
            .collect()
    }
}
