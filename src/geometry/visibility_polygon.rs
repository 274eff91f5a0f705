use crate::math::polygon_2d::{point_in_polygon, rotate_to_canonical_start, signed_area_2d};
use crate::math::Point2;

/// The region directly visible from an observer.
///
/// Points are ordered angularly around the observer and the loop is
/// implicitly closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityPolygon {
    points: Vec<Point2>,
}

impl VisibilityPolygon {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.points).abs()
    }

    /// Returns `true` if `p` lies strictly inside the visible region.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.points)
    }

    /// The vertex loop rotated to start at its leftmost-bottommost vertex,
    /// so polygons that differ only in starting vertex compare equal.
    #[must_use]
    pub fn canonical(&self) -> Vec<Point2> {
        rotate_to_canonical_start(&self.points)
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }
}

impl<'a> IntoIterator for &'a VisibilityPolygon {
    type Item = &'a Point2;
    type IntoIter = std::slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn area_ignores_winding() {
        let mut pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 3.0),
            Point2::new(0.0, 3.0),
        ];
        assert_abs_diff_eq!(VisibilityPolygon::new(pts.clone()).area(), 6.0);
        pts.reverse();
        assert_abs_diff_eq!(VisibilityPolygon::new(pts).area(), 6.0);
    }

    #[test]
    fn canonical_is_rotation_invariant() {
        let a = VisibilityPolygon::new(vec![
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
        ]);
        let b = VisibilityPolygon::new(vec![
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ]);
        assert_eq!(a.canonical(), b.canonical());
        assert!(a.contains(&Point2::new(0.5, -0.5)));
        assert_eq!((&a).into_iter().count(), 4);
    }
}
