//! End-to-end scenarios against the public session API.

use std::cell::RefCell;
use std::rc::Rc;

use rladder_core::{
    BoardTopology, GameSession, PieceColor, PieceId, StarContact, StarEvent, Tile,
};

fn t(n: u8) -> Tile {
    Tile::new(n).unwrap()
}

fn collect_events(session: &mut GameSession) -> Rc<RefCell<Vec<StarEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |e| sink.borrow_mut().push(*e));
    events
}

#[test]
fn ladder_from_start_and_undo() {
    let board = BoardTopology::from_pairs(&[(4, 25)], &[]).unwrap();
    let mut session = GameSession::new(board);
    let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();

    let outcome = session.move_piece(id, 3).unwrap();
    assert_eq!(outcome.target, t(4));
    assert_eq!(outcome.to, t(25));
    assert_eq!(session.history().last().unwrap().previous_position, Tile::FIRST);

    session.undo_last_move();
    assert_eq!(session.piece(id).unwrap().position(), Tile::FIRST);
}

#[test]
fn snake_head_from_95() {
    let board = BoardTopology::from_pairs(&[], &[(99, 41)]).unwrap();
    let mut session = GameSession::new(board);
    let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
    session.place_piece(id, t(95)).unwrap();

    assert_eq!(session.move_piece(id, 4).unwrap().to, t(41));
}

#[test]
fn single_star_crossing() {
    let mut session = GameSession::new(BoardTopology::empty());
    let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
    session.place_piece(id, t(10)).unwrap();
    session.replace_star_tiles(&[t(12)]);
    let events = collect_events(&mut session);

    session.move_piece(id, 5).unwrap();
    assert_eq!(
        *events.borrow(),
        vec![StarEvent { piece_id: id, tile: t(12), contact: StarContact::Passed }]
    );
}

#[test]
fn only_first_star_in_sweep_is_reported() {
    let mut session = GameSession::new(BoardTopology::empty());
    let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
    session.place_piece(id, t(10)).unwrap();
    session.replace_star_tiles(&[t(12), t(14)]);
    let events = collect_events(&mut session);

    session.move_piece(id, 5).unwrap();
    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tile, t(12));
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut session = GameSession::default();
    let a = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
    let b = session.add_piece("Beta", PieceColor::new("#00ff00")).unwrap().id();
    assert_eq!((a, b), (PieceId::new(1), PieceId::new(2)));

    session.remove_piece(a);
    let c = session.add_piece("Gamma", PieceColor::new("#0000ff")).unwrap().id();
    assert_eq!(c, PieceId::new(3));
}

#[test]
fn replaced_stars_are_listed_sorted() {
    let mut session = GameSession::default();
    session.replace_star_tiles(&[t(5), t(3), t(9)]);
    assert_eq!(session.list_star_tiles(), vec![t(3), t(5), t(9)]);

    session.add_star_tiles(&[t(4), t(9)]);
    assert_eq!(session.list_star_tiles(), vec![t(3), t(4), t(5), t(9)]);
    assert!(session.remove_star_tile(t(4)));
    assert!(!session.remove_star_tile(t(4)));
    session.clear_star_tiles();
    assert!(session.list_star_tiles().is_empty());
}

#[test]
fn undo_restores_any_delta() {
    for delta in [-250, -7, -1, 0, 1, 6, 13, 99, 400] {
        let mut session = GameSession::default();
        let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
        session.place_piece(id, t(57)).unwrap();
        let before = session.piece(id).unwrap().position();

        session.move_piece(id, delta).unwrap();
        session.undo_last_move();
        assert_eq!(session.piece(id).unwrap().position(), before, "delta {delta}");
    }
}

#[test]
fn placement_on_star_under_ladder_reports_landing() {
    let mut session = GameSession::default();
    let id = session.add_piece("Alpha", PieceColor::new("#ff0000")).unwrap().id();
    session.replace_star_tiles(&[t(13)]);
    let events = collect_events(&mut session);

    let outcome = session.place_piece(id, t(13)).unwrap();
    assert_eq!(outcome.to, t(46));
    assert_eq!(events.borrow()[0].contact, StarContact::Landed);
}
