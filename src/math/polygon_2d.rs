use std::cmp::Ordering;

use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Ray-casting point-in-polygon test. Points exactly on an edge may land on
/// either side; callers that care check the edges first.
#[must_use]
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let intersect_x = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Polar ordering of `a` and `b` around `pivot`: by `atan2` angle in
/// `(-pi, pi]`, then by distance from the pivot.
#[must_use]
pub fn compare_around(pivot: &Point2, a: &Point2, b: &Point2) -> Ordering {
    let da = a - pivot;
    let db = b - pivot;
    da.y.atan2(da.x)
        .total_cmp(&db.y.atan2(db.x))
        .then_with(|| da.norm_squared().total_cmp(&db.norm_squared()))
}

/// Sorts `items` by the polar order of their positions around `pivot`.
///
/// The sort is stable, so items at the same angle and distance keep their
/// input order.
pub fn sort_around<T>(items: &mut [T], pivot: &Point2, position: impl Fn(&T) -> Point2) {
    items.sort_by(|a, b| compare_around(pivot, &position(a), &position(b)));
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}
