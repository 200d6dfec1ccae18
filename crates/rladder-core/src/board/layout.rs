//! Display order of the 10x10 board.
//!
//! Rows are listed top to bottom. Tile 1 sits in the bottom-left corner and the
//! numbering snakes back and forth (boustrophedon), so the top row reads
//! 100, 99, ..., 91 from left to right.

use crate::types::Tile;

/// Tiles per row
pub const BOARD_WIDTH: usize = 10;

/// Number of rows
pub const BOARD_HEIGHT: usize = Tile::NUM / BOARD_WIDTH;

/// Tile shown at (`row`, `col`), both counted from the top-left corner.
pub fn tile_at(row: usize, col: usize) -> Option<Tile> {
    if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
        return None;
    }
    let from_bottom = BOARD_HEIGHT - 1 - row;
    let col = if from_bottom % 2 == 1 { BOARD_WIDTH - 1 - col } else { col };
    Tile::new((from_bottom * BOARD_WIDTH + col + 1) as u8)
}

/// Screen position (`row`, `col`) of a tile, inverse of [`tile_at`].
pub fn position_of(tile: Tile) -> (usize, usize) {
    let idx = tile.index();
    let from_bottom = idx / BOARD_WIDTH;
    let col = idx % BOARD_WIDTH;
    let col = if from_bottom % 2 == 1 { BOARD_WIDTH - 1 - col } else { col };
    (BOARD_HEIGHT - 1 - from_bottom, col)
}

/// All rows in display order.
pub fn rows() -> impl Iterator<Item = [Tile; BOARD_WIDTH]> {
    (0..BOARD_HEIGHT).map(|row| {
        let mut tiles = [Tile::FIRST; BOARD_WIDTH];
        for (col, slot) in tiles.iter_mut().enumerate() {
            if let Some(tile) = tile_at(row, col) {
                *slot = tile;
            }
        }
        tiles
    })
}
