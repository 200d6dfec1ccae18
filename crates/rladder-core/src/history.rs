//! Move history for undo.

use crate::types::{PieceId, Tile};

/// Position of a piece before one resolved move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece_id: PieceId,
    pub previous_position: Tile,
}

/// Append-only stack of pre-move positions, shared by all pieces.
///
/// Undo pops; nothing is ever pushed back, so there is no redo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, piece_id: PieceId, previous_position: Tile) {
        self.records.push(MoveRecord {
            piece_id,
            previous_position,
        });
    }

    /// Remove and return the most recent record.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
