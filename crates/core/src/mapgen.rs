//! Procedural mansion generation split into planning, carving, and the
//! composed generator.

pub mod model;

mod carve;
mod generator;
mod grid;
mod layout;

use thiserror::Error;

pub use carve::{VERTICAL_DOOR_OFFSET, VerticalDoorPolicy};
pub use generator::{GeneratorOptions, MansionGenerator};
pub use layout::plan_rooms;
pub use model::{Mansion, RoomDescriptor};

/// Candidate room names, consumed in order.
pub const ROOM_NAMES: [&str; 9] = [
    "Kitchen",
    "Ballroom",
    "Conservatory",
    "DiningRoom",
    "BilliardRoom",
    "Library",
    "Lounge",
    "Hall",
    "Study",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapGenError {
    #[error("at least one room must be requested")]
    NoRooms,
    #[error("too many rooms requested: {requested} (only {available} room names available)")]
    TooManyRooms { requested: usize, available: usize },
    #[error("mansion dimensions must be positive and fit i32 coordinates, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error(
        "room cells of {cell_width}x{cell_height} leave no interior; each cell needs at least 3x3"
    )]
    RoomTooSmall { cell_width: usize, cell_height: usize },
}

pub fn generate_mansion(
    num_rooms: usize,
    width: usize,
    height: usize,
) -> Result<Mansion, MapGenError> {
    MansionGenerator::default().generate(num_rooms, width, height)
}

#[cfg(test)]
mod tests {
    use super::{MansionGenerator, MapGenError};

    #[test]
    fn generate_mansion_matches_default_generator_output() {
        let from_helper = super::generate_mansion(6, 40, 15).expect("valid layout");
        let from_generator = MansionGenerator::default().generate(6, 40, 15).expect("valid layout");

        assert_eq!(from_helper, from_generator);
    }

    #[test]
    fn too_many_rooms_is_an_error_not_a_panic() {
        let err = super::generate_mansion(10, 40, 15).expect_err("only nine names exist");
        assert_eq!(err, MapGenError::TooManyRooms { requested: 10, available: 9 });
        assert!(err.to_string().contains("too many rooms requested"));
    }
}
