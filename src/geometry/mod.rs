pub mod boundary;
pub mod segment;
pub mod visibility_polygon;

pub use boundary::Boundary;
pub use segment::Segment;
pub use visibility_polygon::VisibilityPolygon;
