use nalgebra::{Matrix1x4, Point2};
use num::Integer;

/* ------------------------------------------------------------------------------
 * Type aliases
 * ------------------------------------------------------------------------------ */
pub type Centroid = Point2<i32>;

/* ------------------------------------------------------------------------------
 * Rect struct
 * ------------------------------------------------------------------------------ */

/// Axis-aligned box in integer pixel coordinates, stored as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    xyxy: Matrix1x4<i32>,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            xyxy: Matrix1x4::new(x1, y1, x2, y2),
        }
    }

    #[inline(always)]
    pub fn x1(&self) -> i32 {
        self.xyxy[(0, 0)]
    }

    #[inline(always)]
    pub fn y1(&self) -> i32 {
        self.xyxy[(0, 1)]
    }

    #[inline(always)]
    pub fn x2(&self) -> i32 {
        self.xyxy[(0, 2)]
    }

    #[inline(always)]
    pub fn y2(&self) -> i32 {
        self.xyxy[(0, 3)]
    }

    /// `x1 < x2 && y1 < y2`. The tracker never checks this itself.
    pub fn is_well_formed(&self) -> bool {
        self.x1() < self.x2() && self.y1() < self.y2()
    }

    /// Integer midpoint, floored toward negative infinity on both axes.
    pub fn centroid(&self) -> Centroid {
        let cx = Integer::div_floor(&(self.x1() as i64 + self.x2() as i64), &2);
        let cy = Integer::div_floor(&(self.y1() as i64 + self.y2() as i64), &2);
        Centroid::new(cx as i32, cy as i32)
    }

    /// Get bounding box as [x1, y1, x2, y2] format
    pub fn get_xyxy(&self) -> [i32; 4] {
        [self.x1(), self.y1(), self.x2(), self.y2()]
    }
}

/// Euclidean distance between two centroids.
pub fn centroid_distance(a: &Centroid, b: &Centroid) -> f64 {
    let dx = (a.x as i64 - b.x as i64) as f64;
    let dy = (a.y as i64 - b.y as i64) as f64;
    dx.hypot(dy)
}
