use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2, PositionInTriangulation, Triangulation};
use tracing::debug;

use crate::geometry::{TriangleVertices, Vec2};

use super::input::TriangulationInput;
use super::NavMeshError;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

#[derive(Debug, Clone)]
pub(crate) struct TriangulationOutput {
    pub(crate) triangles: Vec<TriangleVertices>,
    pub(crate) carved: usize,
}

/// Constrained Delaunay triangulation of the input graph.
///
/// Constraint segments that cross are split at their intersection. Triangles
/// reachable from the outside of the hull or from a hole point without
/// crossing a constraint segment are removed, leaving only the regions
/// enclosed by boxes that are not holes.
pub(crate) fn triangulate(input: &TriangulationInput) -> Result<TriangulationOutput, NavMeshError> {
    let mut cdt = Cdt::new();
    let mut handles = Vec::with_capacity(input.vertices.len());
    for vertex in &input.vertices {
        let handle = cdt
            .insert(Point2::new(vertex.x, vertex.y))
            .map_err(|reason| NavMeshError::Triangulation {
                x: vertex.x,
                y: vertex.y,
                reason,
            })?;
        handles.push(handle);
    }

    for &(from, to) in &input.segments {
        let (from, to) = (handles[from], handles[to]);
        if from == to {
            continue;
        }
        cdt.add_constraint_and_split(from, to, |position| position);
    }

    let mut removed = vec![false; cdt.num_all_faces()];
    let mut pending = exterior_seeds(&cdt);
    for hole in &input.holes {
        pending.extend(hole_seeds(&cdt, *hole)?);
    }
    let carved = carve(&cdt, &mut removed, pending);

    let triangles = cdt
        .inner_faces()
        .filter(|face| !removed[face.fix().index()])
        .map(|face| {
            face.vertices().map(|vertex| {
                let position = vertex.position();
                Vec2::new(position.x, position.y)
            })
        })
        .collect::<Vec<_>>();

    debug!(
        vertices = cdt.num_vertices(),
        constraints = cdt.num_constraints(),
        faces = cdt.num_inner_faces(),
        carved,
        kept = triangles.len(),
        "triangulation_complete"
    );

    Ok(TriangulationOutput { triangles, carved })
}

fn exterior_seeds(cdt: &Cdt) -> Vec<FixedFaceHandle<InnerTag>> {
    let mut seeds = Vec::new();
    for face in cdt.inner_faces() {
        let touches_unconstrained_hull = face.adjacent_edges().iter().any(|edge| {
            edge.rev().face().is_outer() && !cdt.is_constraint_edge(edge.as_undirected().fix())
        });
        if touches_unconstrained_hull {
            seeds.push(face.fix());
        }
    }
    seeds
}

fn hole_seeds(cdt: &Cdt, hole: Vec2) -> Result<Vec<FixedFaceHandle<InnerTag>>, NavMeshError> {
    match cdt.locate(Point2::new(hole.x, hole.y)) {
        PositionInTriangulation::OnFace(face) => Ok(vec![face]),
        PositionInTriangulation::OnEdge(edge) => {
            let edge = cdt.directed_edge(edge);
            Ok([edge.face(), edge.rev().face()]
                .into_iter()
                .filter_map(|face| face.as_inner().map(|inner| inner.fix()))
                .collect())
        }
        PositionInTriangulation::OnVertex(_) => Err(NavMeshError::HoleOnVertex {
            x: hole.x,
            y: hole.y,
        }),
        PositionInTriangulation::OutsideOfConvexHull(_) | PositionInTriangulation::NoTriangulation => {
            Err(NavMeshError::HoleOutsideMesh {
                x: hole.x,
                y: hole.y,
            })
        }
    }
}

fn carve(cdt: &Cdt, removed: &mut [bool], mut pending: Vec<FixedFaceHandle<InnerTag>>) -> usize {
    let mut carved = 0usize;
    while let Some(fixed) = pending.pop() {
        let index = fixed.index();
        if removed[index] {
            continue;
        }
        removed[index] = true;
        carved += 1;

        for edge in cdt.face(fixed).adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                if !removed[neighbor.fix().index()] {
                    pending.push(neighbor.fix());
                }
            }
        }
    }
    carved
}
