use std::collections::HashMap;

use tracing::info;

use crate::geometry::{point_in_triangle, triangle_centroid, PointKey, TriangleVertices, Vec2};

use super::input::TriangulationInput;
use super::triangulate::triangulate;
use super::{LevelGeometry, NavMeshError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One walkable triangle of the mesh.
///
/// `nodes` are the midpoints of the edges this triangle shares with a
/// neighbour, in edge order `(v0, v1)`, `(v1, v2)`, `(v2, v0)`. Edges facing a
/// wall or the map exterior carry no node.
#[derive(Debug, Clone, PartialEq)]
pub struct NavTriangle {
    vertices: TriangleVertices,
    nodes: Vec<NodeId>,
    neighbors: Vec<TriangleId>,
}

impl NavTriangle {
    pub fn vertices(&self) -> &TriangleVertices {
        &self.vertices
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn neighbors(&self) -> &[TriangleId] {
        &self.neighbors
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point_in_triangle(point, &self.vertices)
    }

    pub fn centroid(&self) -> Vec2 {
        triangle_centroid(&self.vertices)
    }
}

/// Edge midpoint shared by the triangles on both sides of that edge.
#[derive(Debug, Clone, PartialEq)]
pub struct NavNode {
    position: Vec2,
    triangles: Vec<TriangleId>,
}

impl NavNode {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }
}

/// Immutable walkable-area graph. Geometry changes require a full rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct NavMesh {
    triangles: Vec<NavTriangle>,
    nodes: Vec<NavNode>,
}

impl NavMesh {
    pub fn build(level: &LevelGeometry) -> Result<Self, NavMeshError> {
        let input = TriangulationInput::from_level(level)?;
        let output = triangulate(&input)?;
        let mesh = Self::from_triangles(output.triangles)?;
        info!(
            rooms = level.rooms.len(),
            obstacles = level.obstacles.len(),
            triangles = mesh.triangle_count(),
            nodes = mesh.node_count(),
            carved = output.carved,
            "navmesh_built"
        );
        Ok(mesh)
    }

    /// Wraps already triangulated walkable area. Triangles are neighbours when
    /// they share two vertices, compared by exact position.
    pub fn from_triangles(triangles: Vec<TriangleVertices>) -> Result<Self, NavMeshError> {
        if triangles.is_empty() {
            return Err(NavMeshError::NoTriangles);
        }

        let mut edge_owners: HashMap<(PointKey, PointKey), Vec<TriangleId>> = HashMap::new();
        for (index, vertices) in triangles.iter().enumerate() {
            for (a, b) in triangle_edges(vertices) {
                edge_owners
                    .entry(edge_key(a, b))
                    .or_default()
                    .push(TriangleId(index));
            }
        }

        let mut nav_triangles = Vec::with_capacity(triangles.len());
        let mut nodes: Vec<NavNode> = Vec::new();
        let mut node_lookup: HashMap<PointKey, NodeId> = HashMap::new();

        for (index, vertices) in triangles.into_iter().enumerate() {
            let id = TriangleId(index);
            let mut neighbors = Vec::new();
            let mut triangle_nodes = Vec::new();

            for (a, b) in triangle_edges(&vertices) {
                let owners = edge_owners
                    .get(&edge_key(a, b))
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let mut shared = false;
                for owner in owners.iter().copied().filter(|owner| *owner != id) {
                    shared = true;
                    if !neighbors.contains(&owner) {
                        neighbors.push(owner);
                    }
                }
                if !shared {
                    continue;
                }

                let midpoint = a.midpoint(b);
                let node_id = *node_lookup.entry(midpoint.key()).or_insert_with(|| {
                    nodes.push(NavNode {
                        position: midpoint,
                        triangles: Vec::new(),
                    });
                    NodeId(nodes.len() - 1)
                });
                let node = &mut nodes[node_id.0];
                if !node.triangles.contains(&id) {
                    node.triangles.push(id);
                }
                if !triangle_nodes.contains(&node_id) {
                    triangle_nodes.push(node_id);
                }
            }

            neighbors.sort();
            nav_triangles.push(NavTriangle {
                vertices,
                nodes: triangle_nodes,
                neighbors,
            });
        }

        Ok(Self {
            triangles: nav_triangles,
            nodes,
        })
    }

    pub fn triangles(&self) -> &[NavTriangle] {
        &self.triangles
    }

    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&NavTriangle> {
        self.triangles.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id.0)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First triangle strictly containing `point`, by linear scan.
    pub fn locate(&self, point: Vec2) -> Option<TriangleId> {
        self.triangles
            .iter()
            .position(|triangle| triangle.contains(point))
            .map(TriangleId)
    }
}

fn triangle_edges(vertices: &TriangleVertices) -> [(Vec2, Vec2); 3] {
    let [a, b, c] = *vertices;
    [(a, b), (b, c), (c, a)]
}

fn edge_key(a: Vec2, b: Vec2) -> (PointKey, PointKey) {
    let (a, b) = (a.key(), b.key());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
