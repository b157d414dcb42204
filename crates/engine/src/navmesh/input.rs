use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::geometry::{PointKey, Rect, Vec2};

use super::NavMeshError;

/// A walkable room and the passable gaps cut into its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomGeometry {
    pub rect: Rect,
    #[serde(default)]
    pub doors: Vec<Rect>,
}

/// Static level description consumed by the navmesh builder.
///
/// Obstacles are impassable blocks; each becomes a hole in the walkable area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelGeometry {
    pub rooms: Vec<RoomGeometry>,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
}

impl LevelGeometry {
    /// Doors across all rooms; a door listed by two neighbouring rooms
    /// appears once.
    pub fn unique_doors(&self) -> Vec<Rect> {
        let mut doors: Vec<Rect> = Vec::new();
        for room in &self.rooms {
            for door in &room.doors {
                if !doors.contains(door) {
                    doors.push(*door);
                }
            }
        }
        doors
    }

    pub fn validate(&self) -> Result<(), NavMeshError> {
        if self.rooms.is_empty() {
            return Err(NavMeshError::EmptyLevel);
        }
        let mut door_index = 0usize;
        for (index, room) in self.rooms.iter().enumerate() {
            room.rect
                .validate()
                .map_err(|source| NavMeshError::InvalidRect {
                    kind: "room",
                    index,
                    source,
                })?;
            for door in &room.doors {
                door.validate().map_err(|source| NavMeshError::InvalidRect {
                    kind: "door",
                    index: door_index,
                    source,
                })?;
                door_index += 1;
            }
        }
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            obstacle
                .validate()
                .map_err(|source| NavMeshError::InvalidRect {
                    kind: "obstacle",
                    index,
                    source,
                })?;
        }
        Ok(())
    }
}

/// Planar straight-line graph handed to the triangulator: unique vertices,
/// constraint segments by vertex index, and hole seed points.
#[derive(Debug, Clone, Default)]
pub(crate) struct TriangulationInput {
    pub(crate) vertices: Vec<Vec2>,
    pub(crate) segments: Vec<(usize, usize)>,
    pub(crate) holes: Vec<Vec2>,
    vertex_lookup: HashMap<PointKey, usize>,
    segment_lookup: HashSet<(usize, usize)>,
}

impl TriangulationInput {
    pub(crate) fn from_level(level: &LevelGeometry) -> Result<Self, NavMeshError> {
        level.validate()?;

        let mut input = Self::default();
        for room in &level.rooms {
            input.push_box(&room.rect);
        }
        for door in level.unique_doors() {
            input.push_box(&door);
        }
        for obstacle in &level.obstacles {
            input.push_box(obstacle);
            input.holes.push(obstacle.center());
        }
        Ok(input)
    }

    fn push_box(&mut self, rect: &Rect) {
        for segment in rect.segments() {
            let from = self.vertex_index(segment.p1);
            let to = self.vertex_index(segment.p2);
            let key = (from.min(to), from.max(to));
            if self.segment_lookup.insert(key) {
                self.segments.push((from, to));
            }
        }
    }

    fn vertex_index(&mut self, point: Vec2) -> usize {
        if let Some(index) = self.vertex_lookup.get(&point.key()) {
            return *index;
        }
        let index = self.vertices.len();
        self.vertices.push(point);
        self.vertex_lookup.insert(point.key(), index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryError;

    fn two_rooms_sharing_a_door() -> LevelGeometry {
        let door = Rect::new(90.0, 40.0, 20.0, 20.0);
        LevelGeometry {
            rooms: vec![
                RoomGeometry {
                    rect: Rect::new(0.0, 0.0, 100.0, 100.0),
                    doors: vec![door],
                },
                RoomGeometry {
                    rect: Rect::new(100.0, 0.0, 100.0, 100.0),
                    doors: vec![door],
                },
            ],
            obstacles: vec![Rect::new(40.0, 40.0, 10.0, 10.0)],
        }
    }

    #[test]
    fn shared_doors_are_deduplicated() {
        assert_eq!(two_rooms_sharing_a_door().unique_doors().len(), 1);
    }

    #[test]
    fn boxes_share_vertices_and_segments() {
        let input = TriangulationInput::from_level(&two_rooms_sharing_a_door()).expect("input");
        // 6 room corners + 4 door corners + 4 obstacle corners.
        assert_eq!(input.vertices.len(), 14);
        // The shared wall x=100 is listed once.
        assert_eq!(input.segments.len(), 4 + 3 + 4 + 4);
        assert_eq!(input.holes, vec![Vec2::new(45.0, 45.0)]);
    }

    #[test]
    fn empty_and_invalid_levels_are_rejected() {
        assert!(matches!(
            TriangulationInput::from_level(&LevelGeometry::default()),
            Err(NavMeshError::EmptyLevel)
        ));

        let mut level = two_rooms_sharing_a_door();
        level.obstacles.push(Rect::new(0.0, 0.0, -1.0, 3.0));
        match TriangulationInput::from_level(&level) {
            Err(NavMeshError::InvalidRect {
                kind: "obstacle",
                index: 1,
                source: GeometryError::NonPositiveSize { .. },
            }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
