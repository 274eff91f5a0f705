use super::Point2;

/// Returns the squared minimum distance from `p` to the segment `a`-`b`.
///
/// A zero-length segment degrades to the point-to-point distance.
#[must_use]
pub fn point_to_segment_dist_sq(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        return (p - a).norm_squared();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;

    (p - closest).norm_squared()
}

/// Returns `true` if `p` lies within `tolerance` of the segment `a`-`b`.
#[must_use]
pub fn point_on_segment(p: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> bool {
    point_to_segment_dist_sq(p, a, b) <= tolerance * tolerance
}
