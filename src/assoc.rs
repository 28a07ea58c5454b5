//! Association between existing tracks and the detections of a new frame.
//!
//! Tracks are matched to detections by Euclidean centroid distance using a
//! greedy nearest-neighbor pass: rows are visited in order of their closest
//! detection and each row may only claim its own nearest column.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::rect::{centroid_distance, Centroid};
use nalgebra::DMatrix;

/// Compute the Euclidean distance between every track and every detection.
///
/// # Arguments
/// * `tracks` - Track centroids, one per row
/// * `detections` - Detection centroids, one per column
///
/// # Returns
/// A matrix of shape (num_tracks, num_detections)
pub fn distance_batch(tracks: &[Centroid], detections: &[Centroid]) -> DMatrix<f64> {
    DMatrix::from_fn(tracks.len(), detections.len(), |i, j| {
        centroid_distance(&tracks[i], &detections[j])
    })
}

/// Result of greedy assignment
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentResult {
    /// Matched pairs as (track_index, detection_index)
    pub matches: Vec<(usize, usize)>,
    /// Indices of unmatched tracks, ascending
    pub unmatched_tracks: Vec<usize>,
    /// Indices of unmatched detections, ascending
    pub unmatched_detections: Vec<usize>,
}

/// Index and value of the smallest entry in row `i`. Ties keep the lowest column.
fn row_argmin(cost_matrix: &DMatrix<f64>, i: usize) -> (usize, f64) {
    let mut best = (0, cost_matrix[(i, 0)]);
    for j in 1..cost_matrix.ncols() {
        if cost_matrix[(i, j)] < best.1 {
            best = (j, cost_matrix[(i, j)]);
        }
    }
    best
}

/// Greedy nearest-neighbor assignment.
///
/// Rows are ordered by ascending row minimum (stable, so equal minima keep
/// their original row order). Each row proposes its own argmin column and is
/// accepted only if neither the row nor the column was taken earlier. A row
/// whose nearest column is already claimed stays unmatched even when another
/// free column exists.
///
/// # Arguments
/// * `cost_matrix` - Distance matrix of shape (num_tracks, num_detections)
///
/// # Returns
/// Assignment result containing matches and unmatched indices
pub fn greedy_assignment(cost_matrix: &DMatrix<f64>) -> AssignmentResult {
    let num_trks = cost_matrix.nrows();
    let num_dets = cost_matrix.ncols();

    if num_trks == 0 || num_dets == 0 {
        return AssignmentResult {
            matches: Vec::new(),
            unmatched_tracks: (0..num_trks).collect(),
            unmatched_detections: (0..num_dets).collect(),
        };
    }

    let mut proposals: Vec<(usize, usize, f64)> = (0..num_trks)
        .map(|i| {
            let (j, d) = row_argmin(cost_matrix, i);
            (i, j, d)
        })
        .collect();
    // NaN only shows up for malformed input; treat it as equal so the sort stays total
    proposals.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

    let mut used_rows = HashSet::new();
    let mut used_cols = HashSet::new();
    let mut matches = Vec::new();
    for (row, col, _) in proposals {
        if used_rows.contains(&row) || used_cols.contains(&col) {
            continue;
        }
        used_rows.insert(row);
        used_cols.insert(col);
        matches.push((row, col));
    }

    AssignmentResult {
        matches,
        unmatched_tracks: (0..num_trks).filter(|r| !used_rows.contains(r)).collect(),
        unmatched_detections: (0..num_dets).filter(|c| !used_cols.contains(c)).collect(),
    }
}
