mod error;
mod input;
mod mesh;
mod triangulate;

pub use error::NavMeshError;
pub use input::{LevelGeometry, RoomGeometry};
pub use mesh::{NavMesh, NavNode, NavTriangle, NodeId, TriangleId};
