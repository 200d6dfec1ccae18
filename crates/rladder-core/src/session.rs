//! Game session: the single owner of all mutable board state.

use std::fmt;

use log::{debug, info};
use rand::Rng;

use crate::board::BoardTopology;
use crate::error::{PersistError, SessionError, SessionResult};
use crate::history::{MoveHistory, MoveRecord};
use crate::movement::{MoveOutcome, MoveRequest, MovementResolver, StarEvent};
use crate::persist::{self, StateStore};
use crate::registry::PieceRegistry;
use crate::stars::{DEFAULT_STAR_COUNT, StarTileSet};
use crate::types::{Piece, PieceColor, PieceId, Tile};

type StarListener = Box<dyn FnMut(&StarEvent)>;

/// State of one game: pieces, star tiles, move history and the selected piece.
///
/// Every operation runs to completion on `&mut self`; there is no shared or
/// global state. Callers persist with [`GameSession::save`] after mutating.
pub struct GameSession {
    topology: BoardTopology,
    pieces: PieceRegistry,
    stars: StarTileSet,
    history: MoveHistory,
    selected: Option<PieceId>,
    listeners: Vec<StarListener>,
}

impl GameSession {
    pub fn new(topology: BoardTopology) -> Self {
        Self::with_state(topology, PieceRegistry::new(), StarTileSet::new())
    }

    pub fn with_state(topology: BoardTopology, pieces: PieceRegistry, stars: StarTileSet) -> Self {
        Self {
            topology,
            pieces,
            stars,
            history: MoveHistory::new(),
            selected: None,
            listeners: Vec::new(),
        }
    }

    /// Load pieces and stars from `store`; missing blobs start empty.
    pub fn restore(topology: BoardTopology, store: &dyn StateStore) -> Result<Self, PersistError> {
        let pieces = persist::load_pieces(store)?;
        let stars = persist::load_stars(store)?;
        info!("restored {} pieces and {} star tiles", pieces.len(), stars.len());
        Ok(Self::with_state(topology, pieces, stars))
    }

    /// Write pieces and stars to `store`. History and selection are not persisted.
    pub fn save(&self, store: &mut dyn StateStore) -> Result<(), PersistError> {
        persist::save_pieces(store, &self.pieces)?;
        persist::save_stars(store, &self.stars)
    }

    /// Register a callback for star notifications.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StarEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    // ---- movement ----

    /// Move a piece by `delta` points (negative moves backward).
    pub fn move_piece(&mut self, id: PieceId, delta: i32) -> SessionResult<MoveOutcome> {
        self.apply(id, MoveRequest::Relative { delta })
    }

    /// Put a piece directly on `target` (drag-and-drop).
    pub fn place_piece(&mut self, id: PieceId, target: Tile) -> SessionResult<MoveOutcome> {
        self.apply(id, MoveRequest::Place { target })
    }

    fn apply(&mut self, id: PieceId, request: MoveRequest) -> SessionResult<MoveOutcome> {
        let from = self.pieces.get(id).ok_or(SessionError::NotFound(id))?.position();
        let outcome = MovementResolver::new(&self.topology, &self.stars).resolve(id, from, request);

        self.history.record(id, from);
        self.pieces.set_position(id, outcome.to)?;
        debug!(
            "piece {id}: {request:?} {} -> {} -> {}",
            outcome.from, outcome.target, outcome.to
        );

        if let Some(event) = outcome.star {
            self.notify_star(&event);
        }
        Ok(outcome)
    }

    fn notify_star(&mut self, event: &StarEvent) {
        let name = self.pieces.get(event.piece_id).map_or("?", Piece::name);
        info!("{name} {} star at {}", event.contact, event.tile);
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    // ---- undo ----

    /// Undo the most recent move of any piece.
    ///
    /// The piece goes straight back to its recorded tile: no star check, no
    /// snake/ladder, and no new history entry. Returns the popped record, or
    /// `None` when there was nothing to undo.
    pub fn undo_last_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        if self.pieces.set_position(record.piece_id, record.previous_position).is_err() {
            debug!("undo: piece {} no longer exists, record dropped", record.piece_id);
        }
        Some(record)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    // ---- pieces ----

    pub fn add_piece(&mut self, name: &str, color: PieceColor) -> SessionResult<&Piece> {
        self.pieces.add(name, color)
    }

    pub fn edit_piece(
        &mut self,
        id: PieceId,
        name: &str,
        color: PieceColor,
    ) -> SessionResult<&Piece> {
        self.pieces.edit(id, name, color)
    }

    /// Remove a piece; a no-op for unknown ids.
    pub fn remove_piece(&mut self, id: PieceId) -> bool {
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.pieces.remove(id)
    }

    /// Drop every piece together with the move history and the selection.
    pub fn reset_all_pieces(&mut self) {
        info!("resetting {} pieces", self.pieces.len());
        self.pieces.clear();
        self.history.clear();
        self.selected = None;
    }

    pub fn list_pieces(&self) -> &[Piece] {
        self.pieces.as_slice()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn pieces(&self) -> &PieceRegistry {
        &self.pieces
    }

    pub fn select_piece(&mut self, id: PieceId) -> SessionResult<&Piece> {
        let piece = self.pieces.get(id).ok_or(SessionError::NotFound(id))?;
        self.selected = Some(id);
        Ok(piece)
    }

    pub fn selected_piece(&self) -> Option<&Piece> {
        self.selected.and_then(|id| self.pieces.get(id))
    }

    // ---- stars ----

    pub fn add_star_tiles(&mut self, tiles: &[Tile]) {
        self.stars.add(tiles.iter().copied());
    }

    pub fn replace_star_tiles(&mut self, tiles: &[Tile]) {
        self.stars.replace(tiles.iter().copied());
    }

    pub fn remove_star_tile(&mut self, tile: Tile) -> bool {
        self.stars.remove(tile)
    }

    pub fn clear_star_tiles(&mut self) {
        self.stars.clear();
    }

    /// Replace the stars with ten random tiles from 2..=99.
    pub fn generate_random_stars<R: Rng>(&mut self, rng: &mut R) {
        self.generate_random_stars_with(rng, DEFAULT_STAR_COUNT, Tile::STAR_MIN, Tile::STAR_MAX);
    }

    pub fn generate_random_stars_with<R: Rng>(
        &mut self,
        rng: &mut R,
        count: usize,
        min: Tile,
        max: Tile,
    ) {
        self.stars.random_generate(rng, count, min, max);
        debug!("generated stars: {:?}", self.stars.to_vec());
    }

    pub fn list_star_tiles(&self) -> Vec<Tile> {
        self.stars.to_vec()
    }

    pub fn stars(&self) -> &StarTileSet {
        &self.stars
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(BoardTopology::standard())
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("topology", &self.topology)
            .field("pieces", &self.pieces)
            .field("stars", &self.stars)
            .field("history", &self.history)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn t(n: u8) -> Tile {
        Tile::new(n).unwrap()
    }

    fn session_with_piece() -> (GameSession, PieceId) {
        let mut session = GameSession::default();
        let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
        (session, id)
    }

    #[test]
    fn test_ladder_then_undo() {
        let (mut session, id) = session_with_piece();
        let outcome = session.move_piece(id, 3).unwrap();
        assert_eq!(outcome.target, t(4));
        assert_eq!(session.piece(id).unwrap().position(), t(25));
        assert_eq!(session.history().last().unwrap().previous_position, Tile::FIRST);

        assert!(session.undo_last_move().is_some());
        assert_eq!(session.piece(id).unwrap().position(), Tile::FIRST);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_snake_from_95() {
        let board = BoardTopology::from_pairs(&[], &[(99, 41)]).unwrap();
        let mut session = GameSession::new(board);
        let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
        session.place_piece(id, t(95)).unwrap();

        let outcome = session.move_piece(id, 4).unwrap();
        assert_eq!(outcome.target, t(99));
        assert_eq!(session.piece(id).unwrap().position(), t(41));
    }

    #[test]
    fn test_undo_on_empty_history() {
        let (mut session, id) = session_with_piece();
        assert!(!session.can_undo());
        assert_eq!(session.undo_last_move(), None);
        assert!(!session.can_undo());
        assert_eq!(session.piece(id).unwrap().position(), Tile::FIRST);
    }

    #[test]
    fn test_undo_is_global_and_not_redo() {
        let mut session = GameSession::new(BoardTopology::empty());
        let a = session.add_piece("A", PieceColor::new("#111111")).unwrap().id();
        let b = session.add_piece("B", PieceColor::new("#222222")).unwrap().id();

        session.move_piece(a, 5).unwrap();
        session.move_piece(b, 8).unwrap();
        session.move_piece(a, 2).unwrap();

        session.undo_last_move();
        assert_eq!(session.piece(a).unwrap().position(), t(6));
        session.undo_last_move();
        assert_eq!(session.piece(b).unwrap().position(), Tile::FIRST);
        session.undo_last_move();
        assert_eq!(session.piece(a).unwrap().position(), Tile::FIRST);
        assert_eq!(session.undo_last_move(), None);
    }

    #[test]
    fn test_undo_skips_star_and_special() {
        let (mut session, id) = session_with_piece();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |e| sink.borrow_mut().push(*e));
        session.replace_star_tiles(&[t(4)]);

        session.place_piece(id, t(4)).unwrap();
        assert_eq!(session.piece(id).unwrap().position(), t(25));
        session.move_piece(id, 1).unwrap();
        assert_eq!(events.borrow().len(), 1);

        // back onto 25, which is a ladder top: must stay there
        session.undo_last_move();
        assert_eq!(session.piece(id).unwrap().position(), t(25));
        session.undo_last_move();
        assert_eq!(session.piece(id).unwrap().position(), Tile::FIRST);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_history_recorded_even_without_change() {
        let (mut session, id) = session_with_piece();
        session.move_piece(id, -3).unwrap();
        assert_eq!(session.piece(id).unwrap().position(), Tile::FIRST);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_move_unknown_piece() {
        let mut session = GameSession::default();
        let missing = PieceId::new(42);
        assert_eq!(session.move_piece(missing, 3).unwrap_err(), SessionError::NotFound(missing));
        assert_eq!(
            session.place_piece(missing, t(10)).unwrap_err(),
            SessionError::NotFound(missing)
        );
        assert!(!session.can_undo());
    }

    #[test]
    fn test_star_events_reach_listeners() {
        let (mut session, id) = session_with_piece();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |e| sink.borrow_mut().push(*e));

        session.replace_star_tiles(&[t(12), t(14)]);
        session.place_piece(id, t(10)).unwrap();
        session.move_piece(id, 5).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].piece_id, id);
        assert_eq!(events[0].tile, t(12));
    }

    #[test]
    fn test_undo_after_piece_removed() {
        let (mut session, id) = session_with_piece();
        let other = session.add_piece("Beta", PieceColor::new("#00ff00")).unwrap().id();
        session.move_piece(other, 6).unwrap();
        session.move_piece(id, 6).unwrap();
        session.remove_piece(id);

        let record = session.undo_last_move().unwrap();
        assert_eq!(record.piece_id, id);
        assert_eq!(session.piece(other).unwrap().position(), t(7));
        session.undo_last_move();
        assert_eq!(session.piece(other).unwrap().position(), Tile::FIRST);
    }

    #[test]
    fn test_reset_clears_pieces_history_and_selection() {
        let (mut session, id) = session_with_piece();
        session.select_piece(id).unwrap();
        session.move_piece(id, 2).unwrap();
        session.replace_star_tiles(&[t(50)]);

        session.reset_all_pieces();
        assert!(session.list_pieces().is_empty());
        assert!(!session.can_undo());
        assert!(session.selected_piece().is_none());
        assert_eq!(session.list_star_tiles(), vec![t(50)]);
    }

    #[test]
    fn test_selection_cleared_on_remove() {
        let (mut session, id) = session_with_piece();
        session.select_piece(id).unwrap();
        assert_eq!(session.selected_piece().unwrap().id(), id);
        assert!(session.remove_piece(id));
        assert!(session.selected_piece().is_none());
        assert!(!session.remove_piece(id));
        assert!(session.select_piece(id).is_err());
    }
}
