//! Public data models for the generated mansion and its rooms.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::types::{Direction, Pos, TileKind};

use super::grid::{in_bounds, tile_index};

/// Geometry and naming for one room. Bounds are inclusive interior tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomDescriptor {
    pub name: String,
    pub row: usize,
    pub column: usize,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub center_x: i32,
    pub center_y: i32,
}

impl RoomDescriptor {
    pub fn center(&self) -> Pos {
        Pos::new(self.center_x, self.center_y)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x1 && pos.x <= self.x2 && pos.y >= self.y1 && pos.y <= self.y2
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.y1..=self.y2).flat_map(move |y| (self.x1..=self.x2).map(move |x| Pos::new(x, y)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mansion {
    pub width: usize,
    pub height: usize,
    /// Row-major structural tiles, origin top-left.
    pub tiles: Vec<TileKind>,
    /// Room-name characters embedded in the wall rows.
    pub labels: BTreeMap<Pos, char>,
    pub rooms: Vec<RoomDescriptor>,
    pub room_names: Vec<String>,
}

impl Mansion {
    pub fn in_bounds(&self, pos: Pos) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    /// Out-of-bounds positions read as wall.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[tile_index(self.width, pos)]
    }

    /// Whether the player may stand on `pos`. Labels never affect the answer.
    pub fn is_passable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tile_at(pos).is_passable()
    }

    pub fn label_at(&self, pos: Pos) -> Option<char> {
        self.labels.get(&pos).copied()
    }

    pub fn room_at(&self, pos: Pos) -> Option<&RoomDescriptor> {
        self.rooms.iter().find(|room| room.contains(pos))
    }

    /// Character rendering: `#` wall, `/` door, space floor. Labels are drawn
    /// over wall cells only, so a door is never hidden by a room name.
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let pos = Pos::new(x as i32, y as i32);
                        match (self.tile_at(pos), self.label_at(pos)) {
                            (TileKind::Wall, Some(label)) => label,
                            (tile, _) => tile.glyph(),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Door => 2,
            });
        }

        bytes.extend((self.labels.len() as u32).to_le_bytes());
        for (pos, label) in &self.labels {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
            bytes.extend((*label as u32).to_le_bytes());
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x1, room.y1, room.x2, room.y2, room.center_x, room.center_y] {
                bytes.extend(value.to_le_bytes());
            }
            bytes.extend((room.name.len() as u32).to_le_bytes());
            bytes.extend(room.name.as_bytes());
        }

        bytes
    }

    /// Indices of rooms whose interiors cannot be reached from `start` by
    /// orthogonal steps over passable tiles.
    pub fn unreachable_rooms(&self, start: Pos) -> Vec<usize> {
        let reachable = self.reachable_from(start);
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| !reachable.contains(&room.center()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Shortest sequence of steps from `start` to `goal` over passable tiles.
    pub fn route(&self, start: Pos, goal: Pos) -> Option<Vec<Direction>> {
        if !self.is_passable(start) || !self.is_passable(goal) {
            return None;
        }

        let parents = self.explore(start, Some(goal));
        if !parents.contains_key(&goal) {
            return None;
        }

        let mut steps = Vec::new();
        let mut cursor = goal;
        while let Some(&Some((previous, direction))) = parents.get(&cursor) {
            steps.push(direction);
            cursor = previous;
        }
        steps.reverse();
        Some(steps)
    }

    fn reachable_from(&self, start: Pos) -> BTreeSet<Pos> {
        if !self.is_passable(start) {
            return BTreeSet::new();
        }
        self.explore(start, None).into_keys().collect()
    }

    /// Breadth-first search recording how each visited tile was entered.
    fn explore(&self, start: Pos, goal: Option<Pos>) -> BTreeMap<Pos, Option<(Pos, Direction)>> {
        let mut open = VecDeque::from([start]);
        let mut parents = BTreeMap::from([(start, None)]);
        while let Some(pos) = open.pop_front() {
            if Some(pos) == goal {
                break;
            }
            for direction in Direction::ALL {
                let next = pos.offset(direction);
                if parents.contains_key(&next) || !self.is_passable(next) {
                    continue;
                }
                parents.insert(next, Some((pos, direction)));
                open.push_back(next);
            }
        }
        parents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_room() -> RoomDescriptor {
        RoomDescriptor {
            name: "Study".to_string(),
            row: 0,
            column: 0,
            x1: 2,
            y1: 3,
            x2: 4,
            y2: 5,
            center_x: 3,
            center_y: 4,
        }
    }

    #[test]
    fn interior_visits_every_tile_once_in_row_major_order() {
        let room = sample_room();
        let tiles: Vec<Pos> = room.interior().collect();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles.first(), Some(&Pos::new(2, 3)));
        assert_eq!(tiles.last(), Some(&Pos::new(4, 5)));
        assert!(tiles.iter().all(|&pos| room.contains(pos)));
    }

    #[test]
    fn overlap_detection_is_inclusive() {
        let room = sample_room();
        let touching = RoomDescriptor { x1: 4, x2: 6, ..sample_room() };
        let apart = RoomDescriptor { x1: 5, x2: 6, ..sample_room() };
        assert!(room.overlaps(&touching));
        assert!(!room.overlaps(&apart));
    }

    #[test]
    fn out_of_bounds_reads_as_impassable_wall() {
        let mansion = Mansion {
            width: 3,
            height: 2,
            tiles: vec![TileKind::Floor; 6],
            labels: BTreeMap::new(),
            rooms: Vec::new(),
            room_names: Vec::new(),
        };
        assert_eq!(mansion.tile_at(Pos::new(-1, 0)), TileKind::Wall);
        assert_eq!(mansion.tile_at(Pos::new(3, 0)), TileKind::Wall);
        assert!(!mansion.is_passable(Pos::new(0, 2)));
        assert!(mansion.is_passable(Pos::new(2, 1)));
    }

    #[test]
    fn route_walks_around_walls_and_rejects_solid_goals() {
        let mansion = Mansion {
            width: 3,
            height: 3,
            tiles: vec![
                TileKind::Floor,
                TileKind::Wall,
                TileKind::Floor,
                TileKind::Floor,
                TileKind::Wall,
                TileKind::Floor,
                TileKind::Floor,
                TileKind::Door,
                TileKind::Floor,
            ],
            labels: BTreeMap::new(),
            rooms: Vec::new(),
            room_names: Vec::new(),
        };

        let steps = mansion.route(Pos::new(0, 0), Pos::new(2, 0)).expect("path via the door");
        assert_eq!(
            steps,
            vec![
                Direction::Down,
                Direction::Down,
                Direction::Right,
                Direction::Right,
                Direction::Up,
                Direction::Up,
            ]
        );
        assert_eq!(mansion.route(Pos::new(0, 0), Pos::new(0, 0)), Some(Vec::new()));
        assert!(mansion.route(Pos::new(0, 0), Pos::new(1, 0)).is_none());
    }

    #[test]
    fn labels_render_over_walls_but_not_over_doors() {
        let mansion = Mansion {
            width: 3,
            height: 1,
            tiles: vec![TileKind::Wall, TileKind::Door, TileKind::Floor],
            labels: BTreeMap::from([
                (Pos::new(0, 0), 'H'),
                (Pos::new(1, 0), 'a'),
                (Pos::new(2, 0), 'l'),
            ]),
            rooms: Vec::new(),
            room_names: Vec::new(),
        };
        assert_eq!(mansion.rows(), vec!["H/ ".to_string()]);
        assert!(!mansion.is_passable(Pos::new(0, 0)), "a label never makes a wall passable");
    }
}
