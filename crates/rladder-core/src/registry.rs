//! Piece registry: the teams on the board.

use crate::error::{SessionError, SessionResult};
use crate::types::{Piece, PieceColor, PieceId, Tile};

/// Pieces in creation order.
///
/// Ids are `max(existing) + 1`, so creation order is also id order and an id
/// below the current maximum is never handed out again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a piece on tile 1. The name is stored trimmed.
    pub fn add(&mut self, name: &str, color: PieceColor) -> SessionResult<&Piece> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let id = self.next_id().ok_or(SessionError::IdsExhausted)?;
        self.pieces.push(Piece::new(id, name.to_string(), color));
        Ok(&self.pieces[self.pieces.len() - 1])
    }

    /// Rename/recolor a piece. Its position is left alone.
    pub fn edit(&mut self, id: PieceId, name: &str, color: PieceColor) -> SessionResult<&Piece> {
        let name = name.trim();
        let piece = self.get_mut(id).ok_or(SessionError::NotFound(id))?;
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        piece.name = name.to_string();
        piece.color = color;
        Ok(piece)
    }

    /// Remove a piece. Returns false if there was none.
    pub fn remove(&mut self, id: PieceId) -> bool {
        let before = self.pieces.len();
        self.pieces.retain(|p| p.id != id);
        self.pieces.len() != before
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces standing on `tile`
    pub fn on_tile(&self, tile: Tile) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.position == tile)
    }

    pub(crate) fn set_position(&mut self, id: PieceId, tile: Tile) -> SessionResult<()> {
        let piece = self.get_mut(id).ok_or(SessionError::NotFound(id))?;
        piece.position = tile;
        Ok(())
    }

    /// Rebuild a registry from stored pieces (already validated by the caller).
    pub(crate) fn from_pieces(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    fn next_id(&self) -> Option<PieceId> {
        self.pieces.iter().map(|p| p.id).max().unwrap_or(PieceId::new(0)).next()
    }

    fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }
}
