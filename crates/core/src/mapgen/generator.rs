//! Mansion generation orchestration that composes layout planning and carving.

use std::collections::BTreeMap;

use crate::types::TileKind;

use super::carve::{CarveTarget, VerticalDoorPolicy, carve_doors, carve_room, stamp_label};
use super::layout::plan_rooms;
use super::model::Mansion;
use super::{MapGenError, ROOM_NAMES};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub room_names: Vec<String>,
    pub vertical_door: VerticalDoorPolicy,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            room_names: ROOM_NAMES.iter().map(|name| (*name).to_string()).collect(),
            vertical_door: VerticalDoorPolicy::default(),
        }
    }
}

/// Stateless mansion generator: identical inputs always produce identical output.
#[derive(Clone, Debug, Default)]
pub struct MansionGenerator {
    options: GeneratorOptions,
}

impl MansionGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn generate(
        &self,
        num_rooms: usize,
        width: usize,
        height: usize,
    ) -> Result<Mansion, MapGenError> {
        let names: Vec<&str> = self.options.room_names.iter().map(String::as_str).collect();
        let rooms = plan_rooms(num_rooms, width, height, &names)?;

        let mut tiles = vec![TileKind::Wall; width * height];
        let mut labels = BTreeMap::new();
        let mut target = CarveTarget { tiles: &mut tiles, labels: &mut labels, width, height };
        for room in &rooms {
            carve_room(&mut target, room);
            carve_doors(&mut target, room, self.options.vertical_door);
            stamp_label(&mut target, room);
        }

        let room_names = rooms.iter().map(|room| room.name.clone()).collect();
        let mansion = Mansion { width, height, tiles, labels, rooms, room_names };

        log::debug!("generated {width}x{height} mansion with {num_rooms} rooms");
        if let Some(first_room) = mansion.rooms.first() {
            let unreachable = mansion.unreachable_rooms(first_room.center());
            if !unreachable.is_empty() {
                let names: Vec<&str> =
                    unreachable.iter().map(|&index| mansion.rooms[index].name.as_str()).collect();
                log::warn!("rooms not reachable from {}: {}", first_room.name, names.join(", "));
            }
        }

        Ok(mansion)
    }
}
