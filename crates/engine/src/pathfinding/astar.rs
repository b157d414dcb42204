use tracing::{debug, warn};

use crate::geometry::Vec2;
use crate::navmesh::{NavMesh, NodeId, TriangleId};

use super::{CostModel, PathError, PathfindingConfig, SeedStrategy};

/// A* over the node graph of one navigation mesh.
///
/// Search state lives in per-query scratch buffers, so a planner can be
/// shared freely and concurrent planners over the same mesh do not interfere.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner<'a> {
    mesh: &'a NavMesh,
    config: PathfindingConfig,
}

impl<'a> PathPlanner<'a> {
    pub fn new(mesh: &'a NavMesh, config: PathfindingConfig) -> Self {
        Self { mesh, config }
    }

    pub fn mesh(&self) -> &'a NavMesh {
        self.mesh
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Waypoints from `start` to `end`, both included, or an empty path when
    /// no route can be planned. The failure reason is logged.
    pub fn find_path(&self, start: Vec2, end: Vec2) -> Vec<Vec2> {
        match self.plan_path(start, end) {
            Ok(path) => path,
            Err(error) => {
                warn!(
                    error = %error,
                    start_x = start.x,
                    start_y = start.y,
                    end_x = end.x,
                    end_y = end.y,
                    "path_query_failed"
                );
                Vec::new()
            }
        }
    }

    pub fn plan_path(&self, start: Vec2, end: Vec2) -> Result<Vec<Vec2>, PathError> {
        let start_triangle = self.mesh.locate(start).ok_or(PathError::StartOutside {
            x: start.x,
            y: start.y,
        })?;
        let end_triangle = self
            .mesh
            .locate(end)
            .ok_or(PathError::EndOutside { x: end.x, y: end.y })?;

        if start_triangle == end_triangle {
            return Ok(vec![start, end]);
        }

        let seed = self.seed_node(start_triangle, start)?;
        let goal = self.seed_node(end_triangle, end)?;
        let nodes = self.search(seed, goal)?;

        let mut path = Vec::with_capacity(nodes.len() + 2);
        path.push(start);
        path.extend(nodes.into_iter().map(|node| self.position(node)));
        path.push(end);
        Ok(path)
    }

    fn seed_node(&self, triangle: TriangleId, point: Vec2) -> Result<NodeId, PathError> {
        let nodes = self
            .mesh
            .triangle(triangle)
            .map(|triangle| triangle.nodes())
            .unwrap_or_default();
        let chosen = match self.config.seed_strategy {
            SeedStrategy::FirstNode => nodes.first().copied(),
            SeedStrategy::NearestNode => nodes.iter().copied().min_by(|a, b| {
                let a = self.position(*a).distance_squared(point);
                let b = self.position(*b).distance_squared(point);
                a.total_cmp(&b)
            }),
        };
        chosen.ok_or(PathError::NoWalkableNode {
            triangle: triangle.0,
        })
    }

    fn search(&self, seed: NodeId, goal: NodeId) -> Result<Vec<NodeId>, PathError> {
        let node_count = self.mesh.node_count();
        let mut closed = vec![false; node_count];
        let mut best_g = vec![f64::INFINITY; node_count];
        let mut parent = vec![None::<NodeId>; node_count];
        let mut open = Vec::new();
        let mut next_insertion = 0u64;
        let mut steps = 0usize;

        let seed_h = self.estimate(seed, goal);
        open.push(OpenNode {
            node: seed,
            h: seed_h,
            f: seed_h,
            insertion_order: next_insertion,
        });
        next_insertion += 1;
        best_g[seed.0] = 0.0;

        while !open.is_empty() {
            if steps >= self.config.max_search_steps {
                return Err(PathError::StepLimitExceeded { steps });
            }
            steps += 1;

            let best_index = pick_best_open_node_index(&open);
            let current = open.swap_remove(best_index);
            if closed[current.node.0] {
                continue;
            }
            closed[current.node.0] = true;

            if current.node == goal {
                debug!(
                    steps,
                    open = open.len(),
                    cost = best_g[goal.0],
                    "path_search_complete"
                );
                return reconstruct_node_path(&parent, seed, goal).ok_or(PathError::NoRoute);
            }

            let current_g = best_g[current.node.0];
            for neighbor in self.successors(current.node) {
                if closed[neighbor.0] {
                    continue;
                }
                let tentative_g = current_g + self.step_cost(current.node, neighbor);
                if tentative_g >= best_g[neighbor.0] {
                    continue;
                }

                best_g[neighbor.0] = tentative_g;
                parent[neighbor.0] = Some(current.node);
                let h = self.estimate(neighbor, goal);
                open.push(OpenNode {
                    node: neighbor,
                    h,
                    f: tentative_g + h,
                    insertion_order: next_insertion,
                });
                next_insertion += 1;
            }
        }

        debug!(steps, "path_search_exhausted");
        Err(PathError::NoRoute)
    }

    /// Nodes of every triangle adjacent to a triangle owning `node`.
    fn successors(&self, node: NodeId) -> Vec<NodeId> {
        let mut successors = Vec::new();
        let Some(node) = self.mesh.node(node) else {
            return successors;
        };
        for owner in node.triangles() {
            let Some(owner) = self.mesh.triangle(*owner) else {
                continue;
            };
            for neighbor in owner.neighbors() {
                let Some(neighbor) = self.mesh.triangle(*neighbor) else {
                    continue;
                };
                for candidate in neighbor.nodes() {
                    if !successors.contains(candidate) {
                        successors.push(*candidate);
                    }
                }
            }
        }
        successors
    }

    fn step_cost(&self, from: NodeId, to: NodeId) -> f64 {
        match self.config.cost_model {
            CostModel::HopCount => 1.0,
            CostModel::Euclidean => self.position(from).distance(self.position(to)),
        }
    }

    fn estimate(&self, node: NodeId, goal: NodeId) -> f64 {
        let (node, goal) = (self.position(node), self.position(goal));
        match self.config.cost_model {
            CostModel::HopCount => node.distance_squared(goal),
            CostModel::Euclidean => node.distance(goal),
        }
    }

    fn position(&self, node: NodeId) -> Vec2 {
        self.mesh.nodes()[node.0].position()
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    node: NodeId,
    h: f64,
    f: f64,
    insertion_order: u64,
}

fn pick_best_open_node_index(open: &[OpenNode]) -> usize {
    let mut best_index = 0usize;
    for index in 1..open.len() {
        let current = open[index];
        let best = open[best_index];
        let ordering = current
            .f
            .total_cmp(&best.f)
            .then(current.h.total_cmp(&best.h))
            .then(current.insertion_order.cmp(&best.insertion_order));
        if ordering.is_lt() {
            best_index = index;
        }
    }
    best_index
}

fn reconstruct_node_path(
    parent: &[Option<NodeId>],
    seed: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    let mut cursor = goal;
    let mut nodes = vec![cursor];
    while cursor != seed {
        cursor = parent.get(cursor.0).and_then(|value| *value)?;
        nodes.push(cursor);
    }
    nodes.reverse();
    Some(nodes)
}
