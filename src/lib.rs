//! Polygonal field of view (visibility polygon) for an observer in the plane,
//! occluded by open obstructor polylines and bounded by a sight radius and an
//! enclosing boundary polygon.

pub mod error;
pub mod geometry;
pub mod math;
pub mod obstructor;
pub mod vision;

pub use error::{InputError, NumericalError, Result, VisigonError};
pub use geometry::{Boundary, Segment, VisibilityPolygon};
pub use math::Point2;
pub use obstructor::{ObstructorIndex, PointId};
pub use vision::{compute_visibility, CacheState, Vision, VisionConfig};
