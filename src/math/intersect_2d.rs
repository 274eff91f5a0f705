use super::{cross_2d, Point2, Vector2, ANGULAR_TOLERANCE};

/// A single crossing between two planar primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// The intersection point.
    pub point: Point2,
    /// Parameter along the first primitive.
    pub t: f64,
    /// Parameter along the second primitive, in `[0, 1]`.
    pub u: f64,
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Parallelism is judged on the sine of the enclosed angle against
/// [`ANGULAR_TOLERANCE`], so the result does not depend on the lengths of `d1`
/// and `d2`.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    let scale = d1.norm() * d2.norm();
    if scale <= 0.0 || cross.abs() < ANGULAR_TOLERANCE * scale {
        return None;
    }
    let dp = p2 - p1;
    let t = cross_2d(&dp, d2) / cross;
    let u = cross_2d(&dp, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Endpoints are included with a slack of `tolerance` (distance units)
/// measured along each segment. Parallel and collinear pairs, as well as
/// zero-length segments, report no intersection.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> Option<Crossing> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    let eps_t = tolerance / da.norm();
    let eps_u = tolerance / db.norm();
    if t >= -eps_t && t <= 1.0 + eps_t && u >= -eps_u && u <= 1.0 + eps_u {
        let t = t.clamp(0.0, 1.0);
        Some(Crossing {
            point: point_at(a0, &da, t),
            t,
            u: u.clamp(0.0, 1.0),
        })
    } else {
        None
    }
}

/// Intersection of the ray `origin + t * dir` (`t >= 0`) with a segment.
///
/// `t` is expressed in multiples of `dir`, so with `dir = target - origin`
/// a value of `1.0` lands on `target`. The segment's endpoints carry the same
/// `tolerance` slack as in [`segment_segment_intersect_2d`].
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> Option<Crossing> {
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(origin, dir, b0, &db)?;

    let eps_u = tolerance / db.norm();
    if t >= 0.0 && u >= -eps_u && u <= 1.0 + eps_u {
        let u = u.clamp(0.0, 1.0);
        Some(Crossing {
            point: point_at(b0, &db, u),
            t,
            u,
        })
    } else {
        None
    }
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}
