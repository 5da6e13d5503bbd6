//! Room carving: floor fill, wall-embedded name labels, and door openings
//! toward the left and upper neighbours in the layout grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Pos, TileKind};

use super::grid::{in_bounds, set_tile_checked};
use super::model::RoomDescriptor;

/// Column offset from a room's `x1` for the door pair cut through its top wall.
pub const VERTICAL_DOOR_OFFSET: i32 = 15;

/// Where the door toward the room above is cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalDoorPolicy {
    /// A fixed column offset from `x1`, independent of room width.
    FixedOffset(i32),
    /// The interior's horizontal center.
    InteriorCenter,
}

impl Default for VerticalDoorPolicy {
    fn default() -> Self {
        Self::FixedOffset(VERTICAL_DOOR_OFFSET)
    }
}

impl VerticalDoorPolicy {
    fn door_column(self, room: &RoomDescriptor) -> i32 {
        match self {
            Self::FixedOffset(offset) => room.x1 + offset,
            Self::InteriorCenter => room.center_x,
        }
    }
}

pub(super) struct CarveTarget<'a> {
    pub(super) tiles: &'a mut [TileKind],
    pub(super) labels: &'a mut BTreeMap<Pos, char>,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl CarveTarget<'_> {
    fn set(&mut self, pos: Pos, tile: TileKind) -> bool {
        set_tile_checked(self.tiles, self.width, self.height, pos, tile)
    }
}

pub(super) fn carve_room(target: &mut CarveTarget<'_>, room: &RoomDescriptor) {
    for pos in room.interior() {
        target.set(pos, TileKind::Floor);
    }
}

/// Writes the room name along the wall row above the interior, starting at
/// `x1`. Characters falling outside the grid are dropped.
pub(super) fn stamp_label(target: &mut CarveTarget<'_>, room: &RoomDescriptor) {
    let label_y = room.y1 - 1;
    for (offset, ch) in room.name.chars().enumerate() {
        let pos = Pos::new(room.x1 + offset as i32, label_y);
        if in_bounds(target.width, target.height, pos) {
            target.labels.insert(pos, ch);
        }
    }
}

/// Cuts two-tile door pairs: left through the shared wall when the room is not
/// in the first column, up through the top wall when it is not in the first row.
pub(super) fn carve_doors(
    target: &mut CarveTarget<'_>,
    room: &RoomDescriptor,
    vertical_policy: VerticalDoorPolicy,
) {
    if room.column > 0 {
        for pos in [Pos::new(room.x1 - 1, room.center_y), Pos::new(room.x1 - 2, room.center_y)] {
            if !target.set(pos, TileKind::Door) {
                log::trace!("skipping out-of-range door {pos:?} for {}", room.name);
            }
        }
    }
    if room.row > 0 {
        let door_x = vertical_policy.door_column(room);
        for pos in [Pos::new(door_x, room.y1 - 1), Pos::new(door_x, room.y1 - 2)] {
            if !target.set(pos, TileKind::Door) {
                log::trace!("skipping out-of-range door {pos:?} for {}", room.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str, row: usize, column: usize, x1: i32, y1: i32) -> RoomDescriptor {
        RoomDescriptor {
            name: name.to_string(),
            row,
            column,
            x1,
            y1,
            x2: x1 + 17,
            y2: y1 + 2,
            center_x: x1 + 9,
            center_y: y1 + 1,
        }
    }

    fn doors(tiles: &[TileKind], width: usize) -> Vec<Pos> {
        tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == TileKind::Door)
            .map(|(index, _)| Pos::new((index % width) as i32, (index / width) as i32))
            .collect()
    }

    #[test]
    fn first_room_gets_floor_and_label_but_no_doors() {
        let mut tiles = vec![TileKind::Wall; 40 * 15];
        let mut labels = BTreeMap::new();
        let mut target =
            CarveTarget { tiles: &mut tiles, labels: &mut labels, width: 40, height: 15 };
        let kitchen = room("Kitchen", 0, 0, 1, 1);

        carve_room(&mut target, &kitchen);
        stamp_label(&mut target, &kitchen);
        carve_doors(&mut target, &kitchen, VerticalDoorPolicy::default());

        assert!(doors(&tiles, 40).is_empty());
        assert_eq!(tiles.iter().filter(|&&tile| tile == TileKind::Floor).count(), 18 * 3);
        let label: String = (1..8).filter_map(|x| labels.get(&Pos::new(x, 0))).collect();
        assert_eq!(label, "Kitchen");
    }

    #[test]
    fn right_column_room_opens_left_at_its_vertical_center() {
        let mut tiles = vec![TileKind::Wall; 40 * 15];
        let mut labels = BTreeMap::new();
        let mut target =
            CarveTarget { tiles: &mut tiles, labels: &mut labels, width: 40, height: 15 };

        carve_doors(&mut target, &room("Ballroom", 0, 1, 21, 1), VerticalDoorPolicy::default());

        assert_eq!(doors(&tiles, 40), vec![Pos::new(19, 2), Pos::new(20, 2)]);
    }

    #[test]
    fn lower_room_opens_upward_at_fixed_offset_or_center() {
        let mut tiles = vec![TileKind::Wall; 40 * 15];
        let mut labels = BTreeMap::new();
        let mut target =
            CarveTarget { tiles: &mut tiles, labels: &mut labels, width: 40, height: 15 };
        carve_doors(&mut target, &room("Conservatory", 1, 0, 1, 6), VerticalDoorPolicy::default());
        assert_eq!(doors(&tiles, 40), vec![Pos::new(16, 4), Pos::new(16, 5)]);

        let mut tiles = vec![TileKind::Wall; 40 * 15];
        let mut target =
            CarveTarget { tiles: &mut tiles, labels: &mut labels, width: 40, height: 15 };
        carve_doors(
            &mut target,
            &room("Conservatory", 1, 0, 1, 6),
            VerticalDoorPolicy::InteriorCenter,
        );
        assert_eq!(doors(&tiles, 40), vec![Pos::new(10, 4), Pos::new(10, 5)]);
    }

    #[test]
    fn out_of_range_doors_and_labels_are_clipped_silently() {
        let mut tiles = vec![TileKind::Wall; 12 * 6];
        let mut labels = BTreeMap::new();
        let mut target =
            CarveTarget { tiles: &mut tiles, labels: &mut labels, width: 12, height: 6 };
        let narrow = RoomDescriptor {
            name: "BilliardRoom".to_string(),
            row: 1,
            column: 1,
            x1: 7,
            y1: 4,
            x2: 10,
            y2: 4,
            center_x: 9,
            center_y: 4,
        };

        carve_doors(&mut target, &narrow, VerticalDoorPolicy::default());
        stamp_label(&mut target, &narrow);

        assert_eq!(doors(&tiles, 12), vec![Pos::new(5, 4), Pos::new(6, 4)]);
        let label: String = labels.values().collect();
        assert_eq!(label, "Billi");
    }
}
