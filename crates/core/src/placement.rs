//! One-time distribution of the cast into room interiors.

use crate::content::Cast;
use crate::mapgen::RoomDescriptor;
use crate::types::Pos;

/// Narrowest interior that keeps the suspect and weapon tiles (`x1 + 2`,
/// `x2 - 2`) inside the room.
pub const MIN_INTERIOR_WIDTH: i32 = 5;
/// Shortest interior that keeps the clue row (`y1 + 1`) inside the room.
pub const MIN_INTERIOR_HEIGHT: i32 = 2;

/// The first room whose interior cannot hold the placement convention.
pub fn first_cramped_room(rooms: &[RoomDescriptor]) -> Option<&RoomDescriptor> {
    rooms.iter().find(|room| {
        room.x2 - room.x1 + 1 < MIN_INTERIOR_WIDTH || room.y2 - room.y1 + 1 < MIN_INTERIOR_HEIGHT
    })
}

/// Puts suspect, weapon, and clue `i` into room `i`: the suspect two tiles in
/// from the left wall, the weapon two tiles in from the right wall (both on the
/// center row), and the clue on the center column one row below the top.
/// Entities beyond the room count stay unplaced. The victim lies on the bottom
/// row of the last room.
pub fn place_cast(rooms: &[RoomDescriptor], cast: &mut Cast) {
    let slots = cast.suspects.iter_mut().zip(cast.weapons.iter_mut()).zip(cast.clues.iter_mut());
    for (room, ((suspect, weapon), clue)) in rooms.iter().zip(slots) {
        suspect.pos = Some(Pos::new(room.x1 + 2, room.center_y));
        weapon.pos = Some(Pos::new(room.x2 - 2, room.center_y));
        clue.pos = Some(Pos::new(room.center_x, room.y1 + 1));
    }

    cast.victim.pos = rooms.last().map(|room| Pos::new(room.center_x, room.y2));
}

/// The tile diagonally inside the first room's top-left corner, clamped to the
/// interior for rooms narrower or shorter than two tiles.
pub fn player_start(rooms: &[RoomDescriptor]) -> Option<Pos> {
    rooms.first().map(|room| Pos::new((room.x1 + 1).min(room.x2), (room.y1 + 1).min(room.y2)))
}
