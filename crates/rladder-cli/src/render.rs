//! Text rendering of the session for the console.

use std::fmt::Write;

use rladder_core::board::layout;
use rladder_core::{GameSession, MoveOutcome, Piece, SpecialKind, StarEvent, Tile};

/// Cell width of the board grid
const CELL: usize = 7;

/// One line per team: `id  name  (tile N)  color`, selected team marked with `>`.
pub fn pieces(session: &GameSession) -> String {
    if session.list_pieces().is_empty() {
        return "no teams yet".to_string();
    }
    let selected = session.selected_piece().map(Piece::id);
    let mut out = String::new();
    for piece in session.list_pieces() {
        let mark = if Some(piece.id()) == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{mark}{:>3}  {:<20} (tile {:>3})  {}",
            piece.id(),
            piece.name(),
            piece.position(),
            piece.color()
        );
    }
    out.pop();
    out
}

pub fn stars(session: &GameSession) -> String {
    let tiles = session.list_star_tiles();
    if tiles.is_empty() {
        return "no star tiles yet".to_string();
    }
    let list: Vec<String> = tiles.iter().map(Tile::to_string).collect();
    format!("stars: {}", list.join(" "))
}

/// Human-readable summary of a resolved move.
pub fn outcome(session: &GameSession, outcome: &MoveOutcome) -> String {
    let name = session.piece(outcome.piece_id).map_or("?", Piece::name);
    let mut line = format!("{name}: {} -> {}", outcome.from, outcome.target);
    if let Some(special) = outcome.special {
        let verb = match special.kind {
            SpecialKind::Ladder => "climbs a ladder",
            SpecialKind::Snake => "slides down a snake",
        };
        let _ = write!(line, ", {verb} to {}", outcome.to);
    }
    line
}

pub fn star_event(session: &GameSession, event: &StarEvent) -> String {
    let name = session.piece(event.piece_id).map_or("?", Piece::name);
    format!("* {name} {} the star at {}", event.contact, event.tile)
}

/// Draw the 10x10 board.
///
/// Each cell shows the tile number followed by markers: `*` star,
/// `L`/`S` ladder/snake start, then the ids of the teams standing there.
pub fn board(session: &GameSession) -> String {
    let topology = session.topology();
    let stars = session.stars();
    let border = format!("+{}", format!("{}+", "-".repeat(CELL)).repeat(layout::BOARD_WIDTH));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in layout::rows() {
        out.push('|');
        for tile in row {
            let mut cell = format!("{tile}");
            if stars.contains(tile) {
                cell.push('*');
            }
            match topology.special_at(tile).map(|s| s.kind) {
                Some(SpecialKind::Ladder) => cell.push('L'),
                Some(SpecialKind::Snake) => cell.push('S'),
                None => {}
            }
            let ids: Vec<String> =
                session.pieces().on_tile(tile).map(|p| p.id().to_string()).collect();
            if !ids.is_empty() {
                cell.push(' ');
                cell.push_str(&ids.join(","));
            }
            if cell.len() > CELL {
                cell.truncate(CELL - 1);
                cell.push('+');
            }
            let _ = write!(out, "{cell:<CELL$}|");
        }
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }

    let ladders: Vec<String> = topology.ladders().map(|(a, b)| format!("{a}->{b}")).collect();
    let snakes: Vec<String> = topology.snakes().map(|(a, b)| format!("{a}->{b}")).collect();
    let _ = writeln!(out, "ladders: {}", ladders.join(" "));
    let _ = write!(out, "snakes:  {}", snakes.join(" "));
    out
}
