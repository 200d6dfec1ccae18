//! Basic types (Tile, PieceId, PieceColor, Piece)

mod piece;
mod tile;

pub use piece::{Piece, PieceColor, PieceId};
pub use tile::Tile;
