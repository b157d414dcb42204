use thiserror::Error;

use crate::geometry::GeometryError;

/// Level-authoring problems detected while building a navigation mesh.
#[derive(Debug, Error)]
pub enum NavMeshError {
    #[error("level geometry contains no rooms")]
    EmptyLevel,
    #[error("invalid {kind} rectangle #{index}: {source}")]
    InvalidRect {
        kind: &'static str,
        index: usize,
        #[source]
        source: GeometryError,
    },
    #[error("triangulation rejected vertex ({x}, {y}): {reason:?}")]
    Triangulation {
        x: f64,
        y: f64,
        reason: spade::InsertionError,
    },
    #[error("hole point ({x}, {y}) lies outside the triangulated area")]
    HoleOutsideMesh { x: f64, y: f64 },
    #[error("hole point ({x}, {y}) coincides with a triangulation vertex")]
    HoleOnVertex { x: f64, y: f64 },
    #[error("triangulation left no walkable triangles")]
    NoTriangles,
}
