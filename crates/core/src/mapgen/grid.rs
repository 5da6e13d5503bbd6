//! Grid and tile-space primitives shared by carving and the mansion model.

use crate::types::{Pos, TileKind};

pub(super) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(super) fn tile_index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

/// Writes `tile` at `pos` when it lies inside the grid. Returns whether the
/// write happened.
pub(super) fn set_tile_checked(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    pos: Pos,
    tile: TileKind,
) -> bool {
    if !in_bounds(width, height, pos) {
        return false;
    }
    tiles[tile_index(width, pos)] = tile;
    true
}
