pub mod geometry;
pub mod navmesh;
pub mod pathfinding;
pub mod view;
pub mod visibility;

pub use geometry::{
    normalize_angle, point_in_triangle, ray_intersect, triangle_centroid, GeometryError,
    Intersection, PointKey, Ray, Rect, Segment, TriangleVertices, Vec2,
};
pub use navmesh::{
    LevelGeometry, NavMesh, NavMeshError, NavNode, NavTriangle, NodeId, RoomGeometry, TriangleId,
};
pub use pathfinding::{CostModel, PathError, PathPlanner, PathfindingConfig, SeedStrategy};
pub use view::{world_to_screen, Camera2D, ViewContext, Viewport};
pub use visibility::{
    LightCone, LitRay, OccluderSet, VisibilityConfig, VisibilityEngine, VisibilityPolygon,
};
