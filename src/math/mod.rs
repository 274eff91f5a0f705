pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default geometric tolerance (distance units) for coincidence, on-segment
/// and endpoint-slack checks. Callers pass their own value where one is
/// configured.
pub const TOLERANCE: f64 = 1e-9;

/// Sine of the smallest angle at which two directions still count as
/// crossing. Dimensionless, so it does not follow the distance tolerance.
pub const ANGULAR_TOLERANCE: f64 = 1e-9;

/// Z component of the 3D cross product of two planar vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
