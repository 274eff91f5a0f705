//! Shadow-edge sweep over the angularly sorted candidates.
//!
//! The first pass decides, per vertex, whether a shadow edge starts there and
//! on which side. The second pass emits the polygon in a single traversal.
//! Each vertex adds at most one shadow point, so the sweep always terminates.

use tracing::trace;

use crate::geometry::Segment;
use crate::math::intersect_2d::ray_segment_intersect_2d;
use crate::math::{Point2, Vector2};

use super::scene::{Candidate, Origin, Scene, Side};

/// What the sweep emits for one sorted vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Emit the vertex alone.
    Keep,
    /// Emit the shadow point, then the vertex.
    ShadowBefore(Point2),
    /// Emit the vertex, then the shadow point.
    ShadowAfter(Point2),
    /// The vertex is not on the visibility boundary.
    Drop,
}

/// Which sides of its sight line a vertex has occluders on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flanks {
    pub before: bool,
    pub after: bool,
}

impl Flanks {
    fn mark(&mut self, sight: &Vector2, arms: [Option<Vector2>; 2], tolerance: f64) {
        for arm in arms.iter().flatten() {
            match Side::of(sight, arm, tolerance) {
                Some(Side::Before) => self.before = true,
                Some(Side::After) => self.after = true,
                None => {}
            }
        }
    }
}

/// Pass 1: one decision per sorted candidate.
#[must_use]
pub fn classify(scene: &Scene<'_>, candidates: &[Candidate]) -> Vec<Decision> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let decision = decide(scene, c);
            trace!(index = i, x = c.point.x, y = c.point.y, ?decision, "sweep");
            decision
        })
        .collect()
}

fn decide(scene: &Scene<'_>, candidate: &Candidate) -> Decision {
    if (candidate.point - scene.eye).norm() <= scene.tolerance {
        return Decision::Drop;
    }
    let flanks = flanks(scene, candidate);
    match (flanks.before, flanks.after) {
        (true, true) => Decision::Keep,
        (false, false) => Decision::Drop,
        (false, true) => shadow_point(scene, &candidate.point, Side::Before)
            .map_or(Decision::Keep, Decision::ShadowBefore),
        (true, false) => shadow_point(scene, &candidate.point, Side::After)
            .map_or(Decision::Keep, Decision::ShadowAfter),
    }
}

/// Classifies every occluder arm leaving `candidate` against its sight line.
#[must_use]
pub fn flanks(scene: &Scene<'_>, candidate: &Candidate) -> Flanks {
    let p = &candidate.point;
    let sight = p - scene.eye;
    let n = scene.boundary_edges.len();
    let mut flanks = Flanks::default();

    for obs in &scene.near {
        let arms = match candidate.origin {
            Origin::Obstructor(id) if obs.start == id => [Some(obs.segment.b - p), None],
            Origin::Obstructor(id) if obs.end == id => [Some(obs.segment.a - p), None],
            _ => incident_arms(&obs.segment, p, scene.tolerance),
        };
        flanks.mark(&sight, arms, scene.tolerance);
    }

    for (i, edge) in scene.boundary_edges.iter().enumerate() {
        let arms = match candidate.origin {
            Origin::Boundary(k) if i == k => [Some(edge.b - p), None],
            Origin::Boundary(k) if (i + 1) % n == k => [Some(edge.a - p), None],
            _ => incident_arms(edge, p, scene.tolerance),
        };
        flanks.mark(&sight, arms, scene.tolerance);
    }

    flanks
}

/// Directions in which `seg` leaves `p`: one arm if `p` is an endpoint, two
/// if `p` is interior, none if `p` is off the segment.
fn incident_arms(seg: &Segment, p: &Point2, tolerance: f64) -> [Option<Vector2>; 2] {
    let tol_sq = tolerance * tolerance;
    if (seg.a - p).norm_squared() <= tol_sq {
        [Some(seg.b - p), None]
    } else if (seg.b - p).norm_squared() <= tol_sq {
        [Some(seg.a - p), None]
    } else if seg.contains(p, tolerance) {
        [Some(seg.a - p), Some(seg.b - p)]
    } else {
        [None, None]
    }
}

/// Where the sight line through `point` lands once it passes `point` on the
/// `free` side: the nearest occluder hit strictly beyond `point`, clamped to
/// the vision radius.
///
/// A hit on a segment endpoint only counts if the segment reaches into the
/// `free` side; otherwise the sight line slips past it.
#[must_use]
pub fn shadow_point(scene: &Scene<'_>, point: &Point2, free: Side) -> Option<Point2> {
    let sight = point - scene.eye;
    let reach = sight.norm();
    let mut closest: Option<(f64, Point2)> = None;

    for seg in scene.occluders() {
        let Some(hit) =
            ray_segment_intersect_2d(&scene.eye, &sight, &seg.a, &seg.b, scene.tolerance)
        else {
            continue;
        };
        if (hit.t - 1.0) * reach <= scene.tolerance {
            continue;
        }
        if grazes_past(seg, &hit.point, &sight, free, scene.tolerance) {
            continue;
        }
        if closest.is_none_or(|(t, _)| hit.t < t) {
            closest = Some((hit.t, hit.point));
        }
    }

    let (_, hit) = closest?;
    if (hit - scene.eye).norm_squared() > scene.radius_sq {
        Some(scene.eye + sight * (scene.radius / reach))
    } else {
        Some(hit)
    }
}

fn grazes_past(seg: &Segment, hit: &Point2, sight: &Vector2, free: Side, tolerance: f64) -> bool {
    let tol_sq = tolerance * tolerance;
    let arm = if (seg.a - hit).norm_squared() <= tol_sq {
        seg.b - hit
    } else if (seg.b - hit).norm_squared() <= tol_sq {
        seg.a - hit
    } else {
        return false;
    };
    Side::of(sight, &arm, tolerance) != Some(free)
}

/// Pass 2: emits the polygon, dropping consecutive duplicates (including the
/// last-to-first pair).
#[must_use]
pub fn assemble(candidates: &[Candidate], decisions: &[Decision], tolerance: f64) -> Vec<Point2> {
    let tol_sq = tolerance * tolerance;
    let mut out: Vec<Point2> = Vec::with_capacity(candidates.len() * 2);
    let mut push = |p: Point2| {
        if out.last().is_none_or(|q| (q - p).norm_squared() > tol_sq) {
            out.push(p);
        }
    };

    for (c, decision) in candidates.iter().zip(decisions) {
        match *decision {
            Decision::Keep => push(c.point),
            Decision::ShadowBefore(s) => {
                push(s);
                push(c.point);
            }
            Decision::ShadowAfter(s) => {
                push(c.point);
                push(s);
            }
            Decision::Drop => {}
        }
    }

    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm_squared() <= tol_sq {
        out.pop();
    }
    out
}
