use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::{InputError, Result};
use crate::geometry::Segment;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Stable identifier of a distinct obstructor vertex.
    pub struct PointId;
}

/// One edge of an obstructor polyline, with the ids of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstructorSegment {
    pub start: PointId,
    pub end: PointId,
    pub segment: Segment,
}

impl ObstructorSegment {
    /// Returns `true` if `id` is one of the segment's endpoints.
    #[must_use]
    pub fn has_endpoint(&self, id: PointId) -> bool {
        self.start == id || self.end == id
    }
}

/// Flattened obstructor geometry: the distinct vertices of all polylines and
/// the edges between consecutive vertices of each polyline.
///
/// Polylines stay open: no edge joins the last vertex of a polyline to its
/// first, and no edge ever joins two different polylines. A polyline is
/// closed by repeating its first vertex at the end.
#[derive(Debug, Clone, Default)]
pub struct ObstructorIndex {
    points: SlotMap<PointId, Point2>,
    lookup: HashMap<(u64, u64), PointId>,
    segments: Vec<ObstructorSegment>,
}

impl ObstructorIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a list of polylines.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteInput` if any vertex has a NaN or
    /// infinite coordinate.
    pub fn build<P: AsRef<[Point2]>>(polylines: &[P]) -> Result<Self> {
        let mut index = Self::new();
        for polyline in polylines {
            index.add_polyline(polyline.as_ref())?;
        }
        Ok(index)
    }

    /// Adds a single polyline. A polyline with fewer than two vertices only
    /// contributes its points; zero-length edges are skipped.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteInput` if any vertex has a NaN or
    /// infinite coordinate. The index is left unchanged in that case.
    pub fn add_polyline(&mut self, polyline: &[Point2]) -> Result<()> {
        if polyline.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InputError::NonFiniteInput("obstructor").into());
        }

        let ids: Vec<PointId> = polyline.iter().map(|p| self.intern(*p)).collect();
        for pair in ids.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if start == end {
                continue;
            }
            self.segments.push(ObstructorSegment {
                start,
                end,
                segment: Segment::new(self.points[start], self.points[end]),
            });
        }
        Ok(())
    }

    /// Returns the id of `p`, inserting it if no vertex with exactly the same
    /// coordinates exists yet.
    fn intern(&mut self, p: Point2) -> PointId {
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = self.points.insert(p);
        self.lookup.insert(key, id);
        id
    }

    /// Returns the position of a vertex.
    #[must_use]
    pub fn point(&self, id: PointId) -> Option<&Point2> {
        self.points.get(id)
    }

    /// Iterates all distinct vertices in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point2)> {
        self.points.iter()
    }

    /// All obstructor edges.
    #[must_use]
    pub fn segments(&self) -> &[ObstructorSegment] {
        &self.segments
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VisigonError;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn flattens_polylines_without_cross_edges() {
        let index = ObstructorIndex::build(&[
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            pts(&[(3.0, 0.0), (3.0, 2.0)]),
        ])
        .unwrap();
        assert_eq!(index.point_count(), 5);
        assert_eq!(index.segments().len(), 3);
        // No edge from (1, 1) to (3, 0).
        assert!(!index
            .segments()
            .iter()
            .any(|s| s.segment.a == Point2::new(1.0, 1.0) && s.segment.b == Point2::new(3.0, 0.0)));
    }

    #[test]
    fn shared_vertices_get_one_id() {
        let index = ObstructorIndex::build(&[
            pts(&[(0.0, 0.0), (1.0, 0.0)]),
            pts(&[(1.0, 0.0), (1.0, 1.0)]),
        ])
        .unwrap();
        assert_eq!(index.point_count(), 3);
        let segs = index.segments();
        assert_eq!(segs[0].end, segs[1].start);
    }

    #[test]
    fn negative_zero_is_the_same_vertex() {
        let index = ObstructorIndex::build(&[pts(&[(0.0, 1.0), (-0.0, 1.0), (2.0, 2.0)])]).unwrap();
        assert_eq!(index.point_count(), 2);
        assert_eq!(index.segments().len(), 1);
    }

    #[test]
    fn closed_loop_by_repeating_first_vertex() {
        let index = ObstructorIndex::build(&[pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ])])
        .unwrap();
        assert_eq!(index.point_count(), 3);
        assert_eq!(index.segments().len(), 3);
    }

    #[test]
    fn short_polyline_contributes_points_only() {
        let index = ObstructorIndex::build(&[pts(&[(4.0, 4.0)])]).unwrap();
        assert_eq!(index.point_count(), 1);
        assert!(index.segments().is_empty());
        let (id, p) = index.points().next().unwrap();
        assert_eq!(index.point(id), Some(p));
    }

    #[test]
    fn rejects_non_finite_vertices() {
        let mut index = ObstructorIndex::new();
        let err = index
            .add_polyline(&pts(&[(0.0, 0.0), (f64::INFINITY, 1.0)]))
            .unwrap_err();
        assert!(matches!(err, VisigonError::Input(InputError::NonFiniteInput(_))));
        assert!(index.is_empty());
    }
}
