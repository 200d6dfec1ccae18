//! Line-oriented game-master console.
//!
//! Reads one command per line, applies it to the session and answers on the
//! output writer. State is saved after every command that can change it.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::{Result, anyhow};
use log::{debug, warn};
use rand_xoshiro::Xoshiro256PlusPlus;
use rladder_core::{GameSession, Piece, PieceColor, PieceId, SessionError, StarEvent, StateStore};

use crate::command::{Command, HELP, parse_command};
use crate::config::StarsConfig;
use crate::render;

pub struct Console<W: Write> {
    session: GameSession,
    store: Option<Box<dyn StateStore>>,
    rng: Xoshiro256PlusPlus,
    stars: StarsConfig,
    out: W,
    assume_yes: bool,
    prompt: bool,
    events: Rc<RefCell<Vec<StarEvent>>>,
}

impl<W: Write> Console<W> {
    pub fn new(
        mut session: GameSession,
        store: Option<Box<dyn StateStore>>,
        rng: Xoshiro256PlusPlus,
        stars: StarsConfig,
        out: W,
    ) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |event| sink.borrow_mut().push(*event));
        Self {
            session,
            store,
            rng,
            stars,
            out,
            assume_yes: false,
            prompt: false,
            events,
        }
    }

    /// Skip the confirmation asked by `remove` and `reset`.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Print `> ` before reading each command.
    pub fn prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Process commands until `quit` or end of input.
    ///
    /// Command errors are reported on the output and do not stop the loop;
    /// only I/O errors on input/output are returned.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        loop {
            self.show_prompt()?;
            let Some(line) = lines.next().transpose()? else {
                debug!("input closed");
                break;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let command = match parse_command(line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.out, "error: {e}")?;
                    continue;
                }
            };
            debug!("command: {command:?}");

            if command == Command::Quit {
                break;
            }
            if let Some(question) = self.confirmation(&command) {
                write!(self.out, "{question} [y/N] ")?;
                self.out.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    writeln!(self.out, "cancelled")?;
                    continue;
                }
            }

            let mutating = command.is_mutating();
            if let Err(e) = self.execute(command) {
                writeln!(self.out, "error: {e}")?;
                continue;
            }
            if mutating {
                self.persist();
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Question to ask before a destructive command, if one is due.
    fn confirmation(&self, command: &Command) -> Option<String> {
        if self.assume_yes {
            return None;
        }
        match command {
            Command::Reset => Some("delete all teams?".to_string()),
            Command::Remove { id } => self
                .session
                .piece(*id)
                .map(|piece| format!("delete team {} {}?", piece.id(), piece.name())),
            _ => None,
        }
    }

    fn show_prompt(&mut self) -> Result<()> {
        if self.prompt {
            write!(self.out, "> ")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add { name, color } => {
                let color = match color {
                    Some(color) => PieceColor::new(color),
                    None => PieceColor::random(&mut self.rng),
                };
                let piece = self.session.add_piece(&name, color)?;
                writeln!(self.out, "added team {} {} ({})", piece.id(), piece.name(), piece.color())?;
            }
            Command::Edit { id, name, color } => {
                let color = match color {
                    Some(color) => PieceColor::new(color),
                    None => self
                        .session
                        .piece(id)
                        .map(|p| p.color().clone())
                        .ok_or(SessionError::NotFound(id))?,
                };
                let piece = self.session.edit_piece(id, &name, color)?;
                writeln!(self.out, "team {} is now {} ({})", piece.id(), piece.name(), piece.color())?;
            }
            Command::Remove { id } => {
                if self.session.remove_piece(id) {
                    writeln!(self.out, "removed team {id}")?;
                } else {
                    writeln!(self.out, "no team {id}")?;
                }
            }
            Command::Reset => {
                self.session.reset_all_pieces();
                writeln!(self.out, "all teams removed")?;
            }
            Command::Select { id } => {
                let piece = self.session.select_piece(id)?;
                writeln!(self.out, "selected team {} {}", piece.id(), piece.name())?;
            }
            Command::Move { id, points } => {
                let id = self.target(id)?;
                let outcome = self.session.move_piece(id, points)?;
                writeln!(self.out, "{}", render::outcome(&self.session, &outcome))?;
                self.flush_events()?;
            }
            Command::Place { id, tile } => {
                let id = self.target(id)?;
                let outcome = self.session.place_piece(id, tile)?;
                writeln!(self.out, "{}", render::outcome(&self.session, &outcome))?;
                self.flush_events()?;
            }
            Command::Undo => match self.session.undo_last_move() {
                Some(record) => match self.session.piece(record.piece_id) {
                    Some(piece) => writeln!(
                        self.out,
                        "undo: {} back to {}",
                        piece.name(),
                        record.previous_position
                    )?,
                    None => writeln!(self.out, "undo: team {} no longer exists", record.piece_id)?,
                },
                None => writeln!(self.out, "nothing to undo")?,
            },
            Command::List => writeln!(self.out, "{}", render::pieces(&self.session))?,
            Command::Stars => writeln!(self.out, "{}", render::stars(&self.session))?,
            Command::StarAdd(tiles) => {
                self.session.add_star_tiles(&tiles);
                writeln!(self.out, "{}", render::stars(&self.session))?;
            }
            Command::StarSet(tiles) => {
                self.session.replace_star_tiles(&tiles);
                writeln!(self.out, "{}", render::stars(&self.session))?;
            }
            Command::StarRemove(tile) => {
                if !self.session.remove_star_tile(tile) {
                    writeln!(self.out, "{tile} is not a star tile")?;
                }
                writeln!(self.out, "{}", render::stars(&self.session))?;
            }
            Command::StarClear => {
                self.session.clear_star_tiles();
                writeln!(self.out, "{}", render::stars(&self.session))?;
            }
            Command::StarRandom { count } => {
                let (min, max) = self.stars.bounds();
                let count = count.unwrap_or(self.stars.count);
                self.session.generate_random_stars_with(&mut self.rng, count, min, max);
                writeln!(self.out, "{}", render::stars(&self.session))?;
            }
            Command::Board => writeln!(self.out, "{}", render::board(&self.session))?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Explicit id, else the selected team.
    fn target(&self, id: Option<PieceId>) -> Result<PieceId> {
        id.or_else(|| self.session.selected_piece().map(Piece::id))
            .ok_or_else(|| anyhow!("no team selected; use `select <id>` or give an id"))
    }

    fn flush_events(&mut self) -> Result<()> {
        let events: Vec<StarEvent> = self.events.borrow_mut().drain(..).collect();
        for event in &events {
            writeln!(self.out, "{}", render::star_event(&self.session, event))?;
        }
        Ok(())
    }

    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = self.session.save(store.as_mut()) {
                warn!("failed to save state: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rladder_core::MemoryStore;

    fn console(input: &str, yes: bool) -> Console<Vec<u8>> {
        let mut console = Console::new(
            GameSession::default(),
            None,
            Xoshiro256PlusPlus::seed_from_u64(1),
            StarsConfig::default(),
            Vec::new(),
        )
        .assume_yes(yes);
        console.run(input.as_bytes()).unwrap();
        console
    }

    fn text(console: &Console<Vec<u8>>) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    #[test]
    fn test_move_selected_team() {
        let c = console("add Alpha #ff0000\nselect 1\nmove 3\n", false);
        let out = text(&c);
        assert!(out.contains("added team 1 Alpha (#ff0000)"));
        assert!(out.contains("Alpha: 1 -> 4, climbs a ladder to 25"));
        assert_eq!(c.session().piece(PieceId::new(1)).unwrap().position().get(), 25);
    }

    #[test]
    fn test_move_without_selection_is_reported() {
        let c = console("add Alpha\nmove 3\nlist\n", false);
        let out = text(&c);
        assert!(out.contains("error: no team selected"));
        assert_eq!(c.session().piece(PieceId::new(1)).unwrap().position().get(), 1);
    }

    #[test]
    fn test_star_event_is_printed() {
        let c = console("add Alpha #111111\nplace 1 10\nstar set 12 14\nmove 1 5\n", false);
        let out = text(&c);
        assert!(out.contains("* Alpha passed the star at 12"));
        assert!(!out.contains("star at 14"));
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let c = console("add Alpha\nreset\nno\nlist\n", false);
        assert!(text(&c).contains("cancelled"));
        assert_eq!(c.session().list_pieces().len(), 1);

        let c = console("add Alpha\nreset\ny\n", false);
        assert!(c.session().list_pieces().is_empty());

        let c = console("add Alpha\nreset\n", true);
        assert!(c.session().list_pieces().is_empty());
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let c = console("add Alpha\nadd Beta\nremove 1\nn\n", false);
        let out = text(&c);
        assert!(out.contains("delete team 1 Alpha? [y/N] cancelled"));
        assert_eq!(c.session().list_pieces().len(), 2);

        let c = console("add Alpha\nadd Beta\nremove 1\nyes\n", false);
        assert!(text(&c).contains("removed team 1"));
        assert!(c.session().piece(PieceId::new(1)).is_none());

        let c = console("add Alpha\nremove 1\n", true);
        assert!(c.session().list_pieces().is_empty());

        // unknown ids are reported without asking
        let c = console("remove 9\nlist\n", false);
        let out = text(&c);
        assert!(out.contains("no team 9"));
        assert!(!out.contains("[y/N]"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let c = console("jump\nedit 9 Ghost\nadd Alpha\nquit\nadd Beta\n", false);
        let out = text(&c);
        assert!(out.contains("error: Unknown command: jump"));
        assert!(out.contains("error: piece 9 not found"));
        assert_eq!(c.session().list_pieces().len(), 1);
    }

    #[test]
    fn test_undo_messages() {
        let c = console("undo\nadd Alpha #000000\nmove 1 2\nundo\n", false);
        let out = text(&c);
        assert!(out.contains("nothing to undo"));
        assert!(out.contains("undo: Alpha back to 1"));
    }

    #[test]
    fn test_state_saved_after_mutation() {
        let mut console = Console::new(
            GameSession::default(),
            Some(Box::new(MemoryStore::new())),
            Xoshiro256PlusPlus::seed_from_u64(1),
            StarsConfig::default(),
            Vec::new(),
        );
        console.run("add Alpha #ff0000\nstar set 3\nlist\n".as_bytes()).unwrap();
        let store = console.store.as_ref().unwrap();
        assert_eq!(
            store.load("pieces").unwrap().as_deref(),
            Some(r##"[[1,"Alpha",1,"#ff0000"]]"##)
        );
        assert_eq!(store.load("starTiles").unwrap().as_deref(), Some("[3]"));
    }
}
