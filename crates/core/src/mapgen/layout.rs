//! Room layout planning: a fixed two-column grid of equally sized cells.

use super::MapGenError;
use super::model::RoomDescriptor;

pub(super) const LAYOUT_COLUMNS: usize = 2;
const MIN_CELL_SIZE: usize = 3;
/// Coordinates are `i32`, so neither side may exceed its range.
const MAX_DIMENSION: usize = i32::MAX as usize;

/// Plans `num_rooms` rooms over a `width x height` grid, taking names in order.
///
/// Cells are `width / 2` by `height / rows`; integer-division remainders are
/// left as solid margin on the right and bottom. Each room's interior is its
/// cell inset by one tile on every side.
pub fn plan_rooms(
    num_rooms: usize,
    width: usize,
    height: usize,
    names: &[&str],
) -> Result<Vec<RoomDescriptor>, MapGenError> {
    if num_rooms == 0 {
        return Err(MapGenError::NoRooms);
    }
    if width == 0
        || height == 0
        || width > MAX_DIMENSION
        || height > MAX_DIMENSION
        || width.checked_mul(height).is_none()
    {
        return Err(MapGenError::InvalidDimensions { width, height });
    }
    if num_rooms > names.len() {
        return Err(MapGenError::TooManyRooms { requested: num_rooms, available: names.len() });
    }

    let rows = num_rooms.div_ceil(LAYOUT_COLUMNS);
    let cell_width = width / LAYOUT_COLUMNS;
    let cell_height = height / rows;
    if cell_width < MIN_CELL_SIZE || cell_height < MIN_CELL_SIZE {
        return Err(MapGenError::RoomTooSmall { cell_width, cell_height });
    }

    let interior_width = (cell_width - 2) as i32;
    let interior_height = (cell_height - 2) as i32;

    let rooms = names
        .iter()
        .take(num_rooms)
        .enumerate()
        .map(|(index, name)| {
            let row = index / LAYOUT_COLUMNS;
            let column = index % LAYOUT_COLUMNS;
            let x1 = (column * cell_width) as i32 + 1;
            let y1 = (row * cell_height) as i32 + 1;
            RoomDescriptor {
                name: (*name).to_string(),
                row,
                column,
                x1,
                y1,
                x2: x1 + interior_width - 1,
                y2: y1 + interior_height - 1,
                center_x: x1 + interior_width / 2,
                center_y: y1 + interior_height / 2,
            }
        })
        .collect();

    Ok(rooms)
}
