use survive_engine::{LevelGeometry, OccluderSet, Rect, RoomGeometry, Vec2};

use super::error::GameError;

pub(crate) const WALL_SIZE: f64 = 10.0;
pub(crate) const DOOR_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DoorSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// Rectangular room enclosed by `WALL_SIZE` thick walls. Each door side gets a
/// centred `DOOR_SIZE` gap.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Room {
    rect: Rect,
    doors: Vec<DoorSide>,
}

impl Room {
    pub(crate) fn new(rect: Rect, doors: &[DoorSide]) -> Result<Self, GameError> {
        let minimum = WALL_SIZE * 2.0 + DOOR_SIZE;
        let too_small = rect.validate().is_err()
            || (doors.iter().any(|side| matches!(side, DoorSide::Top | DoorSide::Bottom))
                && rect.width <= minimum)
            || (doors.iter().any(|side| matches!(side, DoorSide::Left | DoorSide::Right))
                && rect.height <= minimum)
            || rect.width <= WALL_SIZE * 2.0
            || rect.height <= WALL_SIZE * 2.0;
        if too_small {
            return Err(GameError::RoomTooSmall {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            });
        }

        let mut unique = Vec::with_capacity(doors.len());
        for side in doors {
            if !unique.contains(side) {
                unique.push(*side);
            }
        }
        Ok(Self {
            rect,
            doors: unique,
        })
    }

    pub(crate) fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn has_door(&self, side: DoorSide) -> bool {
        self.doors.contains(&side)
    }

    /// Four corner blocks, then per side a full wall or two pieces around the
    /// door gap.
    pub(crate) fn walls(&self) -> Vec<Rect> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let inner_width = width - WALL_SIZE * 2.0;
        let inner_height = height - WALL_SIZE * 2.0;
        let right = x + width - WALL_SIZE;
        let bottom = y + height - WALL_SIZE;

        let mut walls = vec![
            Rect::new(x, y, WALL_SIZE, WALL_SIZE),
            Rect::new(right, y, WALL_SIZE, WALL_SIZE),
            Rect::new(x, bottom, WALL_SIZE, WALL_SIZE),
            Rect::new(right, bottom, WALL_SIZE, WALL_SIZE),
        ];

        for (side, wall_y) in [(DoorSide::Top, y), (DoorSide::Bottom, bottom)] {
            let start = x + WALL_SIZE;
            if self.has_door(side) {
                let piece = inner_width * 0.5 - DOOR_SIZE * 0.5;
                walls.push(Rect::new(start, wall_y, piece, WALL_SIZE));
                walls.push(Rect::new(start + piece + DOOR_SIZE, wall_y, piece, WALL_SIZE));
            } else {
                walls.push(Rect::new(start, wall_y, inner_width, WALL_SIZE));
            }
        }

        for (side, wall_x) in [(DoorSide::Left, x), (DoorSide::Right, right)] {
            let start = y + WALL_SIZE;
            if self.has_door(side) {
                let piece = inner_height * 0.5 - DOOR_SIZE * 0.5;
                walls.push(Rect::new(wall_x, start, WALL_SIZE, piece));
                walls.push(Rect::new(wall_x, start + piece + DOOR_SIZE, WALL_SIZE, piece));
            } else {
                walls.push(Rect::new(wall_x, start, WALL_SIZE, inner_height));
            }
        }
        walls
    }

    /// The walkable wall-thickness rectangle of each door.
    pub(crate) fn door_rects(&self) -> Vec<Rect> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let door_x = x + width * 0.5 - DOOR_SIZE * 0.5;
        let door_y = y + height * 0.5 - DOOR_SIZE * 0.5;

        let mut doors = Vec::with_capacity(self.doors.len());
        for side in [
            DoorSide::Top,
            DoorSide::Bottom,
            DoorSide::Left,
            DoorSide::Right,
        ] {
            if !self.has_door(side) {
                continue;
            }
            doors.push(match side {
                DoorSide::Top => Rect::new(door_x, y, DOOR_SIZE, WALL_SIZE),
                DoorSide::Bottom => {
                    Rect::new(door_x, y + height - WALL_SIZE, DOOR_SIZE, WALL_SIZE)
                }
                DoorSide::Left => Rect::new(x, door_y, WALL_SIZE, DOOR_SIZE),
                DoorSide::Right => Rect::new(x + width - WALL_SIZE, door_y, WALL_SIZE, DOOR_SIZE),
            });
        }
        doors
    }
}

/// Rooms and free-standing boxes making up one map.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Level {
    rooms: Vec<Room>,
    boxes: Vec<Rect>,
    player_spawn: Vec2,
    enemy_spawn: Vec2,
    patrol: Vec<Vec2>,
}

impl Level {
    /// Three rooms: a start room with a box, a corridor room to its right, and
    /// a storage room below that with another box.
    pub(crate) fn demo() -> Result<Self, GameError> {
        let rooms = vec![
            Room::new(Rect::new(0.0, 0.0, 400.0, 300.0), &[DoorSide::Right])?,
            Room::new(
                Rect::new(400.0, 0.0, 300.0, 300.0),
                &[DoorSide::Left, DoorSide::Bottom],
            )?,
            Room::new(Rect::new(400.0, 300.0, 300.0, 400.0), &[DoorSide::Top])?,
        ];
        let boxes = vec![
            Rect::new(150.0, 100.0, 60.0, 60.0),
            Rect::new(480.0, 480.0, 75.0, 75.0),
        ];
        Ok(Self {
            rooms,
            boxes,
            player_spawn: Vec2::new(61.3, 58.7),
            enemy_spawn: Vec2::new(618.4, 641.9),
            patrol: vec![
                Vec2::new(338.6, 61.2),
                Vec2::new(341.4, 238.3),
                Vec2::new(62.7, 241.9),
                Vec2::new(61.3, 58.7),
            ],
        })
    }

    pub(crate) fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub(crate) fn boxes(&self) -> &[Rect] {
        &self.boxes
    }

    pub(crate) fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    pub(crate) fn enemy_spawn(&self) -> Vec2 {
        self.enemy_spawn
    }

    pub(crate) fn patrol(&self) -> &[Vec2] {
        &self.patrol
    }

    /// Every sight and movement blocker: room walls followed by boxes.
    pub(crate) fn blocks(&self) -> Vec<Rect> {
        self.rooms
            .iter()
            .flat_map(Room::walls)
            .chain(self.boxes.iter().copied())
            .collect()
    }

    pub(crate) fn geometry(&self) -> LevelGeometry {
        LevelGeometry {
            rooms: self
                .rooms
                .iter()
                .map(|room| RoomGeometry {
                    rect: room.rect(),
                    doors: room.door_rects(),
                })
                .collect(),
            obstacles: self.blocks(),
        }
    }

    pub(crate) fn occluders(&self) -> OccluderSet {
        OccluderSet::from_rects(&self.blocks())
    }
}

#[cfg(test)]
mod tests {
    use survive_engine::NavMesh;

    use super::*;

    fn total_area(rects: &[Rect]) -> f64 {
        rects.iter().map(|rect| rect.width * rect.height).sum()
    }

    #[test]
    fn closed_room_walls_cover_the_whole_border() {
        let room = Room::new(Rect::new(0.0, 0.0, 300.0, 200.0), &[]).expect("room");
        let walls = room.walls();
        assert_eq!(walls.len(), 8);
        let border = 300.0 * 200.0 - 280.0 * 180.0;
        assert!((total_area(&walls) - border).abs() < 1e-9);
    }

    #[test]
    fn door_gap_matches_the_door_rect() {
        let room = Room::new(
            Rect::new(0.0, 0.0, 300.0, 200.0),
            &[DoorSide::Top, DoorSide::Left],
        )
        .expect("room");
        let walls = room.walls();
        let doors = room.door_rects();
        assert_eq!(walls.len(), 10);
        assert_eq!(
            doors,
            vec![
                Rect::new(100.0, 0.0, DOOR_SIZE, WALL_SIZE),
                Rect::new(0.0, 50.0, WALL_SIZE, DOOR_SIZE),
            ]
        );

        let border = 300.0 * 200.0 - 280.0 * 180.0;
        let gaps = total_area(&doors);
        assert!((total_area(&walls) + gaps - border).abs() < 1e-9);
        for door in &doors {
            assert!(!walls.iter().any(|wall| wall.contains(door.center())));
        }
    }

    #[test]
    fn rooms_too_small_for_a_door_are_rejected() {
        assert!(matches!(
            Room::new(Rect::new(0.0, 0.0, 110.0, 300.0), &[DoorSide::Top]),
            Err(GameError::RoomTooSmall { .. })
        ));
        assert!(Room::new(Rect::new(0.0, 0.0, 110.0, 300.0), &[DoorSide::Left]).is_ok());
    }

    #[test]
    fn neighbouring_doors_line_up() {
        let level = Level::demo().expect("level");
        let [start, corridor, storage] = [&level.rooms()[0], &level.rooms()[1], &level.rooms()[2]];
        let right = start.door_rects()[0];
        let left = corridor.door_rects()[1];
        assert_eq!(right.y, left.y);
        assert_eq!(right.right(), left.x);

        let bottom = corridor.door_rects()[0];
        let top = storage.door_rects()[0];
        assert_eq!(bottom.x, top.x);
        assert_eq!(bottom.bottom(), top.y);
    }

    #[test]
    fn demo_level_builds_a_navmesh_that_connects_all_rooms() {
        let level = Level::demo().expect("level");
        let mesh = NavMesh::build(&level.geometry()).expect("navmesh");

        assert!(mesh.locate(level.player_spawn()).is_some());
        assert!(mesh.locate(level.enemy_spawn()).is_some());
        for block in level.blocks() {
            assert!(mesh.locate(block.center()).is_none(), "{block:?} is walkable");
        }
        for room in level.rooms() {
            for door in room.door_rects() {
                let inside = Vec2::new(door.center().x + 0.37, door.center().y + 0.21);
                assert!(mesh.locate(inside).is_some(), "door {door:?} is blocked");
            }
        }
    }

    #[test]
    fn occluders_include_every_wall_corner_once() {
        let level = Level::demo().expect("level");
        let occluders = level.occluders();
        assert_eq!(occluders.segments().len(), level.blocks().len() * 4);
        let mut keys = occluders
            .vertices()
            .iter()
            .map(|vertex| vertex.key())
            .collect::<Vec<_>>();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), occluders.vertices().len());
    }
}
