use crate::geometry::{Boundary, Segment};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{cross_2d, Point2, Vector2};
use crate::obstructor::{ObstructorIndex, ObstructorSegment, PointId};

use super::prune::near_segments;

/// Where a polygon vertex candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// An obstructor vertex.
    Obstructor(PointId),
    /// The boundary vertex at this index.
    Boundary(usize),
    /// An obstructor crossing a boundary edge or another obstructor.
    Crossing,
}

/// A candidate vertex of the visibility polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub point: Point2,
    pub origin: Origin,
}

/// Angular side of a sight line, seen from the eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Clockwise of the sight line (smaller angle).
    Before,
    /// Counter-clockwise of the sight line (larger angle).
    After,
}

impl Side {
    /// Classifies `arm` against the sight line direction `sight`.
    ///
    /// `None` if the far end of `arm` lies within `tolerance` of the line.
    #[must_use]
    pub fn of(sight: &Vector2, arm: &Vector2, tolerance: f64) -> Option<Self> {
        let offset = cross_2d(sight, arm) / sight.norm();
        if offset < -tolerance {
            Some(Self::Before)
        } else if offset > tolerance {
            Some(Self::After)
        } else {
            None
        }
    }
}

/// Inputs shared by all pipeline steps of one computation.
#[derive(Debug)]
pub struct Scene<'a> {
    pub eye: Point2,
    pub radius: f64,
    pub radius_sq: f64,
    pub tolerance: f64,
    /// Obstructor segments that can reach into the vision radius.
    pub near: Vec<&'a ObstructorSegment>,
    pub boundary: &'a Boundary,
    pub boundary_edges: Vec<Segment>,
}

impl<'a> Scene<'a> {
    /// Prepares a computation for `eye`, pruning the obstructors to the ones
    /// that can matter within `radius`.
    #[must_use]
    pub fn new(
        eye: Point2,
        radius: f64,
        tolerance: f64,
        index: &'a ObstructorIndex,
        boundary: &'a Boundary,
    ) -> Self {
        let radius_sq = radius * radius;
        Self {
            eye,
            radius,
            radius_sq,
            tolerance,
            near: near_segments(index.segments(), &eye, radius_sq),
            boundary,
            boundary_edges: boundary.edges().collect(),
        }
    }

    /// Returns `true` if a near obstructor or a boundary edge cuts the sight
    /// line from the eye to `target` before it arrives.
    ///
    /// Obstructor segments ending in `own` never block, and neither does any
    /// segment that meets the sight line only at `target` itself. A reflex
    /// boundary corner in front of `target` blocks like an obstructor
    /// endpoint does.
    #[must_use]
    pub fn sight_blocked(&self, target: &Point2, own: Option<PointId>) -> bool {
        let cuts = |seg: &Segment| {
            segment_segment_intersect_2d(&self.eye, target, &seg.a, &seg.b, self.tolerance)
                .is_some_and(|hit| (target - hit.point).norm() > self.tolerance)
        };
        self.near
            .iter()
            .filter(|obs| !own.is_some_and(|id| obs.has_endpoint(id)))
            .any(|obs| cuts(&obs.segment))
            || self.boundary_edges.iter().any(cuts)
    }

    /// All segments that stop sight: near obstructors, then boundary edges.
    pub fn occluders(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.near
            .iter()
            .map(|obs| &obs.segment)
            .chain(self.boundary_edges.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn sight_blocked_by_wall_but_not_by_own_endpoint() {
        let index = ObstructorIndex::build(&[vec![Point2::new(2.0, -1.0), Point2::new(2.0, 1.0)]])
            .unwrap();
        let boundary =
            Boundary::rectangle(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0)).unwrap();
        let scene = Scene::new(Point2::origin(), 10.0, TOLERANCE, &index, &boundary);
        let (id, end) = index.points().next().unwrap();

        assert!(scene.sight_blocked(&Point2::new(5.0, 0.0), None));
        assert!(!scene.sight_blocked(&Point2::new(-5.0, 0.0), None));
        assert!(!scene.sight_blocked(end, Some(id)));
        // Lying on the wall is not the same as being behind it.
        assert!(!scene.sight_blocked(&Point2::new(2.0, 0.5), None));
        assert_eq!(scene.occluders().count(), 5);
    }

    #[test]
    fn reflex_boundary_corner_blocks_sight() {
        let index = ObstructorIndex::new();
        let boundary = Boundary::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap();
        let scene = Scene::new(Point2::new(5.0, 1.0), 20.0, TOLERANCE, &index, &boundary);

        assert!(scene.sight_blocked(&Point2::new(2.0, 10.0), None));
        assert!(scene.sight_blocked(&Point2::new(0.0, 10.0), None));
        // Corners whose own edges are the only ones touching the sight line.
        assert!(!scene.sight_blocked(&Point2::new(2.0, 2.0), None));
        assert!(!scene.sight_blocked(&Point2::new(10.0, 2.0), None));
        assert!(!scene.sight_blocked(&Point2::new(0.0, 0.0), None));
    }

    #[test]
    fn side_of_arm() {
        let sight = Vector2::new(2.0, -1.0);
        assert_eq!(Side::of(&sight, &Vector2::new(0.0, 2.0), 1e-9), Some(Side::After));
        assert_eq!(Side::of(&sight, &Vector2::new(0.0, -2.0), 1e-9), Some(Side::Before));
        assert_eq!(Side::of(&sight, &Vector2::new(4.0, -2.0), 1e-9), None);
    }
}
