use std::f64::consts::TAU;

use super::Segment;
use crate::error::{InputError, NumericalError, Result};
use crate::math::polygon_2d::{point_in_polygon, signed_area_2d};
use crate::math::{Point2, Vector2, TOLERANCE};

/// The outer polygon limiting the field of view.
///
/// Vertices form a closed loop: the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    points: Vec<Point2>,
}

impl Boundary {
    /// Creates a boundary from an ordered vertex loop.
    ///
    /// # Errors
    ///
    /// Returns `InputError::BoundaryTooSmall` for fewer than 3 vertices,
    /// `InputError::NonFiniteInput` if a coordinate is NaN or infinite, and
    /// `NumericalError::DegenerateBoundary` if the loop encloses no area.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(InputError::BoundaryTooSmall { len: points.len() }.into());
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InputError::NonFiniteInput("boundary").into());
        }
        if signed_area_2d(&points).abs() < TOLERANCE {
            return Err(NumericalError::DegenerateBoundary.into());
        }
        Ok(Self { points })
    }

    /// Approximates a circle with a regular polygon of `segments` sides,
    /// starting at angle zero and running counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonPositiveRadius` if `radius <= 0` and
    /// `InputError::BoundaryTooSmall` if `segments < 3`.
    pub fn circle(center: Point2, radius: f64, segments: usize) -> Result<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(InputError::NonPositiveRadius { radius }.into());
        }
        if segments < 3 {
            return Err(InputError::BoundaryTooSmall { len: segments }.into());
        }
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / segments as f64;
        let points = (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f64;
                center + Vector2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Self::new(points)
    }

    /// Axis-aligned rectangle spanning `min`..`max`, counter-clockwise from `min`.
    ///
    /// # Errors
    ///
    /// Returns `NumericalError::DegenerateBoundary` if the rectangle has no area.
    pub fn rectangle(min: Point2, max: Point2) -> Result<Self> {
        Self::new(vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    /// The ordered boundary vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Iterates the closed edge loop, including the wrap-around edge from the
    /// last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns `true` if `p` is inside the boundary or within `tolerance` of
    /// one of its edges.
    #[must_use]
    pub fn contains(&self, p: &Point2, tolerance: f64) -> bool {
        self.edges().any(|e| e.contains(p, tolerance)) || point_in_polygon(p, &self.points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VisigonError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_short_loops() {
        let err = Boundary::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            VisigonError::Input(InputError::BoundaryTooSmall { len: 2 })
        ));
        assert!(Boundary::new(Vec::new()).is_err());
    }

    #[test]
    fn rejects_collinear_loop() {
        let err = Boundary::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            VisigonError::Numerical(NumericalError::DegenerateBoundary)
        ));
    }

    #[test]
    fn rejects_nan() {
        let err = Boundary::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, VisigonError::Input(InputError::NonFiniteInput(_))));
    }

    #[test]
    fn edges_wrap_around() {
        let b = Boundary::rectangle(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0)).unwrap();
        let edges: Vec<Segment> = b.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].a, Point2::new(-5.0, 5.0));
        assert_eq!(edges[3].b, Point2::new(-5.0, -5.0));
    }

    #[test]
    fn circle_vertices_on_radius() {
        let center = Point2::new(1.0, 2.0);
        let b = Boundary::circle(center, 3.0, 16).unwrap();
        assert_eq!(b.points().len(), 16);
        for p in b.points() {
            assert_abs_diff_eq!((p - center).norm(), 3.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(b.points()[0], Point2::new(4.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn circle_rejects_bad_parameters() {
        assert!(Boundary::circle(Point2::origin(), 0.0, 8).is_err());
        assert!(Boundary::circle(Point2::origin(), 1.0, 2).is_err());
    }

    #[test]
    fn contains_interior_and_edge() {
        let b = Boundary::rectangle(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0)).unwrap();
        assert!(b.contains(&Point2::new(0.0, 0.0), TOLERANCE));
        assert!(b.contains(&Point2::new(5.0, 1.0), TOLERANCE));
        assert!(b.contains(&Point2::new(5.0, 5.0), TOLERANCE));
        assert!(!b.contains(&Point2::new(3.0, 8.0), TOLERANCE));
    }
}
