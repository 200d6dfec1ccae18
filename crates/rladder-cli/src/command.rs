//! Console command parser

use anyhow::{Result, anyhow};
use rladder_core::{PieceId, Tile};

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a team; random color when none is given
    Add { name: String, color: Option<String> },

    /// Rename/recolor a team; keeps the current color when none is given
    Edit { id: PieceId, name: String, color: Option<String> },

    Remove { id: PieceId },

    /// Delete every team and the move history
    Reset,

    Select { id: PieceId },

    /// Move by points; the selected team when `id` is omitted
    Move { id: Option<PieceId>, points: i32 },

    /// Put a team directly on a tile; the selected team when `id` is omitted
    Place { id: Option<PieceId>, tile: Tile },

    Undo,

    /// List teams
    List,

    /// List star tiles
    Stars,

    StarAdd(Vec<Tile>),
    StarSet(Vec<Tile>),
    StarRemove(Tile),
    StarClear,
    StarRandom { count: Option<usize> },

    Board,
    Help,
    Quit,
}

impl Command {
    /// Whether the command can change persisted state
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Select { .. }
                | Command::List
                | Command::Stars
                | Command::Board
                | Command::Help
                | Command::Quit
        )
    }
}

pub const HELP: &str = "\
commands:
  add <name> [#color]           create a team on tile 1
  edit <id> <name> [#color]     rename/recolor a team
  remove <id>                   delete a team
  reset                         delete all teams and the move history
  select <id>                   choose the team used by move/place
  move [<id>] <points>          move by points (negative = backward)
  place [<id>] <tile>           put a team directly on a tile
  undo                          undo the last move of any team
  list                          list teams
  stars                         list star tiles
  star add <tile>...            add star tiles
  star set <tile>...            replace all star tiles
  star rm <tile>                remove one star tile
  star clear                    remove all star tiles
  star random [count]           replace stars with random tiles
  board                         draw the board
  help                          this text
  quit                          leave";

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Err(anyhow!("Empty command"));
    }

    match parts[0] {
        "reset" => Ok(Command::Reset),
        "undo" => Ok(Command::Undo),
        "list" | "ls" => Ok(Command::List),
        "stars" => Ok(Command::Stars),
        "board" => Ok(Command::Board),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),

        "add" => parse_add(&parts[1..]),
        "edit" => parse_edit(&parts[1..]),
        "remove" | "rm" => Ok(Command::Remove {
            id: parse_id(single_arg(&parts[1..], "remove")?)?,
        }),
        "select" => Ok(Command::Select {
            id: parse_id(single_arg(&parts[1..], "select")?)?,
        }),
        "move" => parse_move(&parts[1..]),
        "place" => parse_place(&parts[1..]),
        "star" => parse_star(&parts[1..]),

        _ => Err(anyhow!("Unknown command: {}", parts[0])),
    }
}

/// Split `<name words...> [#color]`
fn split_name_color(parts: &[&str]) -> (String, Option<String>) {
    match parts.split_last() {
        Some((last, rest)) if last.starts_with('#') && !rest.is_empty() => {
            (rest.join(" "), Some((*last).to_string()))
        }
        _ => (parts.join(" "), None),
    }
}

fn parse_add(parts: &[&str]) -> Result<Command> {
    let (name, color) = split_name_color(parts);
    if name.trim().is_empty() {
        return Err(anyhow!("add requires a team name"));
    }
    Ok(Command::Add { name, color })
}

fn parse_edit(parts: &[&str]) -> Result<Command> {
    let Some((id, rest)) = parts.split_first() else {
        return Err(anyhow!("edit requires a team id"));
    };
    let id = parse_id(id)?;
    let (name, color) = split_name_color(rest);
    if name.trim().is_empty() {
        return Err(anyhow!("edit requires a team name"));
    }
    Ok(Command::Edit { id, name, color })
}

fn parse_move(parts: &[&str]) -> Result<Command> {
    let (id, points) = match parts {
        [points] => (None, *points),
        [id, points] => (Some(parse_id(id)?), *points),
        _ => return Err(anyhow!("usage: move [<id>] <points>")),
    };
    let points = points.parse().map_err(|_| anyhow!("Invalid points value: {points}"))?;
    Ok(Command::Move { id, points })
}

fn parse_place(parts: &[&str]) -> Result<Command> {
    let (id, tile) = match parts {
        [tile] => (None, *tile),
        [id, tile] => (Some(parse_id(id)?), *tile),
        _ => return Err(anyhow!("usage: place [<id>] <tile>")),
    };
    Ok(Command::Place { id, tile: tile.parse()? })
}

fn parse_star(parts: &[&str]) -> Result<Command> {
    let Some((sub, args)) = parts.split_first() else {
        return Ok(Command::Stars);
    };
    match *sub {
        "add" => Ok(Command::StarAdd(parse_tiles(args, "star add")?)),
        "set" | "replace" => Ok(Command::StarSet(parse_tiles(args, "star set")?)),
        "rm" | "remove" => Ok(Command::StarRemove(single_arg(args, "star rm")?.parse()?)),
        "clear" => Ok(Command::StarClear),
        "random" => {
            let count: Option<usize> = match args {
                [] => None,
                [n] => Some(n.parse().map_err(|_| anyhow!("Invalid star count: {n}"))?),
                _ => return Err(anyhow!("usage: star random [count]")),
            };
            Ok(Command::StarRandom { count })
        }
        "list" => Ok(Command::Stars),
        _ => Err(anyhow!("Unknown star command: {sub}")),
    }
}

fn parse_tiles(args: &[&str], what: &str) -> Result<Vec<Tile>> {
    if args.is_empty() {
        return Err(anyhow!("{what} requires at least one tile"));
    }
    let tiles = args
        .iter()
        .flat_map(|a| a.split(','))
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Tile>())
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(bad) = tiles.iter().find(|t| !t.is_star_eligible()) {
        return Err(anyhow!("Star tiles must be within 2..=99, got {bad}"));
    }
    Ok(tiles)
}

fn single_arg<'a>(args: &[&'a str], what: &str) -> Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(anyhow!("{what} takes exactly one argument")),
    }
}

fn parse_id(s: &str) -> Result<PieceId> {
    s.parse().map_err(|_| anyhow!("Invalid team id: {s}"))
}
