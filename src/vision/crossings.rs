use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;

use super::scene::Scene;

/// Finds every point where a near obstructor crosses a boundary edge.
#[must_use]
pub fn find_all(scene: &Scene<'_>) -> Vec<Point2> {
    let mut points = Vec::new();
    for obs in &scene.near {
        for edge in &scene.boundary_edges {
            if let Some(hit) = segment_segment_intersect_2d(
                &obs.segment.a,
                &obs.segment.b,
                &edge.a,
                &edge.b,
                scene.tolerance,
            ) {
                points.push(hit.point);
            }
        }
    }
    points
}

/// Finds every point where two near obstructor segments cross each other
/// within the radius and inside the boundary.
///
/// Segments sharing an endpoint meet at that endpoint, which is already an
/// obstructor vertex, so such pairs are skipped.
#[must_use]
pub fn find_between_obstructors(scene: &Scene<'_>) -> Vec<Point2> {
    let mut points = Vec::new();
    for (i, first) in scene.near.iter().enumerate() {
        for second in &scene.near[i + 1..] {
            if first.has_endpoint(second.start) || first.has_endpoint(second.end) {
                continue;
            }
            let Some(hit) = segment_segment_intersect_2d(
                &first.segment.a,
                &first.segment.b,
                &second.segment.a,
                &second.segment.b,
                scene.tolerance,
            ) else {
                continue;
            };
            if (hit.point - scene.eye).norm_squared() <= scene.radius_sq
                && scene.boundary.contains(&hit.point, scene.tolerance)
            {
                points.push(hit.point);
            }
        }
    }
    points
}

/// Drops crossings hidden behind a segment other than the ones that produced
/// them.
#[must_use]
pub fn retain_visible(scene: &Scene<'_>, mut crossings: Vec<Point2>) -> Vec<Point2> {
    crossings.retain(|p| !scene.sight_blocked(p, None));
    crossings
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Boundary;
    use crate::math::TOLERANCE;
    use crate::obstructor::ObstructorIndex;
    use approx::assert_abs_diff_eq;

    fn square() -> Boundary {
        Boundary::rectangle(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0)).unwrap()
    }

    #[test]
    fn wall_through_boundary() {
        let index = ObstructorIndex::build(&[vec![Point2::new(3.0, -1.0), Point2::new(3.0, 8.0)]])
            .unwrap();
        let boundary = square();
        let scene = Scene::new(Point2::origin(), 10.0, TOLERANCE, &index, &boundary);
        let found = find_all(&scene);
        assert_eq!(found.len(), 1);
        assert_abs_diff_eq!(found[0], Point2::new(3.0, 5.0), epsilon = TOLERANCE);
        // The wall that made the crossing does not hide it.
        assert_eq!(retain_visible(&scene, found).len(), 1);
    }

    #[test]
    fn crossing_hidden_by_other_wall() {
        let index = ObstructorIndex::build(&[
            vec![Point2::new(4.0, -1.0), Point2::new(7.0, -1.0)],
            vec![Point2::new(2.0, -2.0), Point2::new(2.0, 2.0)],
        ])
        .unwrap();
        let boundary = square();
        let scene = Scene::new(Point2::origin(), 10.0, TOLERANCE, &index, &boundary);
        let found = find_all(&scene);
        assert_eq!(found.len(), 1);
        assert_abs_diff_eq!(found[0], Point2::new(5.0, -1.0), epsilon = TOLERANCE);
        assert!(retain_visible(&scene, found).is_empty());
    }

    #[test]
    fn crossed_walls_meet_once() {
        let index = ObstructorIndex::build(&[
            vec![Point2::new(2.0, -2.0), Point2::new(3.0, 2.0)],
            vec![Point2::new(3.0, -2.0), Point2::new(2.0, 2.0)],
        ])
        .unwrap();
        let boundary = square();
        let scene = Scene::new(Point2::origin(), 10.0, TOLERANCE, &index, &boundary);
        let found = find_between_obstructors(&scene);
        assert_eq!(found.len(), 1);
        assert_abs_diff_eq!(found[0], Point2::new(2.5, 0.0), epsilon = TOLERANCE);
        assert_eq!(retain_visible(&scene, found).len(), 1);
    }

    #[test]
    fn polyline_joints_are_not_crossings() {
        let index = ObstructorIndex::build(&[vec![
            Point2::new(2.0, -1.0),
            Point2::new(2.0, 1.0),
            Point2::new(3.0, 1.0),
            Point2::new(2.0, -1.0),
        ]])
        .unwrap();
        let boundary = square();
        let scene = Scene::new(Point2::origin(), 10.0, TOLERANCE, &index, &boundary);
        assert!(find_between_obstructors(&scene).is_empty());
    }

    #[test]
    fn crossing_outside_radius_is_ignored() {
        let index = ObstructorIndex::build(&[
            vec![Point2::new(2.0, -2.0), Point2::new(4.0, 2.0)],
            vec![Point2::new(4.0, -2.0), Point2::new(2.0, 2.0)],
        ])
        .unwrap();
        let boundary = square();
        let scene = Scene::new(Point2::origin(), 2.9, TOLERANCE, &index, &boundary);
        assert_eq!(scene.near.len(), 2);
        assert!(find_between_obstructors(&scene).is_empty());
    }

    #[test]
    fn no_crossings_inside() {
        let index = ObstructorIndex::build(&[vec![Point2::new(2.0, -1.0), Point2::new(2.0, 1.0)]])
            .unwrap();
        let boundary = square();
        let scene = Scene::new(Point2::origin(), 10.0, TOLERANCE, &index, &boundary);
        assert!(find_all(&scene).is_empty());
    }
}
