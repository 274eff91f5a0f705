use crate::obstructor::ObstructorIndex;

use super::scene::{Candidate, Origin, Scene};

/// Collects the obstructor and boundary vertices directly visible from the
/// eye.
///
/// Obstructor vertices must also lie within the vision radius and inside the
/// boundary. Boundary vertices count regardless of the radius.
#[must_use]
pub fn collect(scene: &Scene<'_>, index: &ObstructorIndex) -> Vec<Candidate> {
    let obstructor_points = index
        .points()
        .filter(|(id, p)| {
            (*p - scene.eye).norm_squared() <= scene.radius_sq
                && scene.boundary.contains(p, scene.tolerance)
                && !scene.sight_blocked(p, Some(*id))
        })
        .map(|(id, p)| Candidate {
            point: *p,
            origin: Origin::Obstructor(id),
        });

    let boundary_points = scene
        .boundary
        .points()
        .iter()
        .enumerate()
        .filter(|(_, p)| !scene.sight_blocked(p, None))
        .map(|(i, p)| Candidate {
            point: *p,
            origin: Origin::Boundary(i),
        });

    obstructor_points.chain(boundary_points).collect()
}
