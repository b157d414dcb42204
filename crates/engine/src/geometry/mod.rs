mod primitives;
mod ray;
mod triangle;

pub use primitives::{normalize_angle, GeometryError, PointKey, Rect, Segment, Vec2};
pub use ray::{ray_intersect, Intersection, Ray};
pub use triangle::{point_in_triangle, triangle_centroid, TriangleVertices};
