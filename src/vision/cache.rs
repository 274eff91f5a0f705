use crate::geometry::VisibilityPolygon;
use crate::math::Point2;

/// The last computed polygon and the inputs it was computed for.
///
/// A cached polygon goes stale when the eye moves by more than the staleness
/// threshold (squared distance) or when the radius changes at all. The
/// boundary is not part of the key: it is expected to travel with the eye.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheState {
    eye: Point2,
    radius: f64,
    polygon: VisibilityPolygon,
}

impl CacheState {
    #[must_use]
    pub fn new(eye: Point2, radius: f64, polygon: VisibilityPolygon) -> Self {
        Self {
            eye,
            radius,
            polygon,
        }
    }

    #[must_use]
    pub fn eye(&self) -> Point2 {
        self.eye
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn polygon(&self) -> &VisibilityPolygon {
        &self.polygon
    }

    /// Returns `true` if the cached polygon cannot be reused for `eye` and
    /// `radius`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_stale(&self, eye: &Point2, radius: f64, epsilon_sq: f64) -> bool {
        (self.eye - eye).norm_squared() > epsilon_sq || self.radius != radius
    }
}
