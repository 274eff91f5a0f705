use crate::math::distance_2d::{point_on_segment, point_to_segment_dist_sq};
use crate::math::{Point2, Vector2};

/// A straight segment between two points.
///
/// Endpoint order only matters to orientation-dependent predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

impl Segment {
    /// Creates a segment from `a` to `b`.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Direction vector from `a` to `b` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.b - self.a
    }

    /// Squared distance from `p` to the closest point of the segment.
    #[must_use]
    pub fn dist_sq_to(&self, p: &Point2) -> f64 {
        point_to_segment_dist_sq(p, &self.a, &self.b)
    }

    /// Returns `true` if `p` lies on the segment within `tolerance`.
    #[must_use]
    pub fn contains(&self, p: &Point2, tolerance: f64) -> bool {
        point_on_segment(p, &self.a, &self.b, tolerance)
    }
}
