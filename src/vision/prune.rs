use crate::math::Point2;
use crate::obstructor::ObstructorSegment;

/// Keeps the obstructor segments that come within `radius_sq` (squared) of
/// the eye. Anything farther cannot occlude inside the vision radius.
#[must_use]
pub fn near_segments<'a>(
    segments: &'a [ObstructorSegment],
    eye: &Point2,
    radius_sq: f64,
) -> Vec<&'a ObstructorSegment> {
    segments
        .iter()
        .filter(|s| s.segment.dist_sq_to(eye) <= radius_sq)
        .collect()
}
