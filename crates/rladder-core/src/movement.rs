//! Movement resolution.
//!
//! Turns a move request into the tile a piece ends up on:
//!
//! 1. relative moves are clamped into 1..=100, placements are taken as-is
//! 2. star tiles are looked up on the swept path (relative) or on the landing
//!    tile only (placement); only the first star hit is reported
//! 3. one snake/ladder lookup is applied to the reached tile
//!
//! The resolver is pure; committing the result and recording history is the
//! session's job.

use std::fmt;

use crate::board::{BoardTopology, Special};
use crate::stars::StarTileSet;
use crate::types::{PieceId, Tile};

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// Move by a number of points; negative values move backward
    Relative { delta: i32 },
    /// Put the piece directly on a tile (drag-and-drop)
    Place { target: Tile },
}

/// How a piece met a star tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarContact {
    /// The star is the tile the move reached (before any snake/ladder)
    Landed,
    /// The star was swept over on the way
    Passed,
}

impl fmt::Display for StarContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarContact::Landed => f.write_str("landed on"),
            StarContact::Passed => f.write_str("passed"),
        }
    }
}

/// Notification that a piece crossed or landed on a star tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarEvent {
    pub piece_id: PieceId,
    pub tile: Tile,
    pub contact: StarContact,
}

/// Result of resolving one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece_id: PieceId,
    /// Position before the move
    pub from: Tile,
    /// Tile reached before snake/ladder resolution
    pub target: Tile,
    /// Final position
    pub to: Tile,
    /// Snake or ladder taken at `target`
    pub special: Option<Special>,
    /// First star met, if any
    pub star: Option<StarEvent>,
}

/// Inclusive tiles from `from` to `to`, walking in the direction of `to`.
pub fn sweep(from: Tile, to: Tile) -> Box<dyn Iterator<Item = Tile>> {
    let (a, b) = (from.get(), to.get());
    if b >= a {
        Box::new((a..=b).filter_map(Tile::new))
    } else {
        Box::new((b..=a).rev().filter_map(Tile::new))
    }
}

/// Borrowed view of the board used to resolve moves.
#[derive(Debug, Clone, Copy)]
pub struct MovementResolver<'a> {
    topology: &'a BoardTopology,
    stars: &'a StarTileSet,
}

impl<'a> MovementResolver<'a> {
    pub fn new(topology: &'a BoardTopology, stars: &'a StarTileSet) -> Self {
        Self { topology, stars }
    }

    /// Resolve `request` for a piece currently standing on `from`.
    pub fn resolve(&self, piece_id: PieceId, from: Tile, request: MoveRequest) -> MoveOutcome {
        let (target, star_tile) = match request {
            MoveRequest::Relative { delta } => {
                let target = Tile::clamped(from.get() as i64 + delta as i64);
                (target, self.first_star(from, target))
            }
            MoveRequest::Place { target } => {
                (target, self.stars.contains(target).then_some(target))
            }
        };

        let special = self.topology.special_at(target);
        let to = self.topology.resolve_special(target);

        let star = star_tile.map(|tile| StarEvent {
            piece_id,
            tile,
            contact: if tile == target { StarContact::Landed } else { StarContact::Passed },
        });

        MoveOutcome {
            piece_id,
            from,
            target,
            to,
            special,
            star,
        }
    }

    /// First star tile in sweep order between `from` and `target`, both included.
    pub fn first_star(&self, from: Tile, target: Tile) -> Option<Tile> {
        if self.stars.is_empty() {
            return None;
        }
        sweep(from, target).find(|&tile| self.stars.contains(tile))
    }
}
