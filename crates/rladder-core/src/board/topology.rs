//! Snakes and ladders of the board.

use std::fmt;

use crate::error::TopologyError;
use crate::types::Tile;

/// Ladders of the standard board (bottom, top)
pub const STANDARD_LADDERS: [(u8, u8); 6] =
    [(4, 25), (13, 46), (42, 63), (50, 69), (62, 81), (74, 92)];

/// Snakes of the standard board (head, tail)
pub const STANDARD_SNAKES: [(u8, u8); 8] =
    [(99, 41), (95, 77), (89, 53), (66, 45), (54, 31), (43, 18), (40, 3), (27, 5)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    Ladder,
    Snake,
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialKind::Ladder => f.write_str("ladder"),
            SpecialKind::Snake => f.write_str("snake"),
        }
    }
}

/// A snake or ladder starting at some tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Special {
    pub kind: SpecialKind,
    pub target: Tile,
}

/// Fixed tile -> tile transitions, indexed by source tile.
///
/// Invariants (checked by [`BoardTopology::from_pairs`]):
/// - a tile is the source of at most one snake or ladder
/// - no destination is itself a source, so one lookup always settles a move
/// - ladders climb, snakes descend
/// - tiles 1 and 100 are never sources
#[derive(Clone, PartialEq, Eq)]
pub struct BoardTopology {
    specials: [Option<Special>; Tile::NUM],
}

impl BoardTopology {
    /// Board without any snake or ladder.
    pub fn empty() -> BoardTopology {
        BoardTopology { specials: [None; Tile::NUM] }
    }

    /// The standard board.
    pub fn standard() -> BoardTopology {
        match Self::from_pairs(&STANDARD_LADDERS, &STANDARD_SNAKES) {
            Ok(topology) => topology,
            Err(e) => unreachable!("standard board is valid: {e}"),
        }
    }

    /// Build a board from (bottom, top) ladder pairs and (head, tail) snake pairs.
    pub fn from_pairs(
        ladders: &[(u8, u8)],
        snakes: &[(u8, u8)],
    ) -> Result<BoardTopology, TopologyError> {
        let mut specials: [Option<Special>; Tile::NUM] = [None; Tile::NUM];

        let entries = ladders
            .iter()
            .map(|&pair| (SpecialKind::Ladder, pair))
            .chain(snakes.iter().map(|&pair| (SpecialKind::Snake, pair)));

        for (kind, (from, to)) in entries {
            let from = Tile::try_from(from)?;
            let to = Tile::try_from(to)?;

            if from == Tile::FIRST || from == Tile::LAST {
                return Err(TopologyError::ReservedTile(from));
            }
            match kind {
                SpecialKind::Ladder if to <= from => {
                    return Err(TopologyError::LadderNotUp { bottom: from, top: to });
                }
                SpecialKind::Snake if to >= from => {
                    return Err(TopologyError::SnakeNotDown { head: from, tail: to });
                }
                _ => {}
            }

            match specials[from.index()] {
                Some(existing) if existing.kind == kind => {
                    return Err(TopologyError::Duplicate(from));
                }
                Some(_) => return Err(TopologyError::Overlap(from)),
                None => specials[from.index()] = Some(Special { kind, target: to }),
            }
        }

        for from in Tile::all() {
            if let Some(special) = specials[from.index()] {
                if specials[special.target.index()].is_some() {
                    return Err(TopologyError::Chained { from, to: special.target });
                }
            }
        }

        Ok(BoardTopology { specials })
    }

    /// Snake or ladder starting at `tile`, if any.
    #[inline]
    pub fn special_at(&self, tile: Tile) -> Option<Special> {
        self.specials[tile.index()]
    }

    /// Apply at most one snake or ladder to `tile`.
    ///
    /// Never chains: the result is taken as-is even if it were a source itself,
    /// which the construction invariants rule out anyway.
    #[inline]
    pub fn resolve_special(&self, tile: Tile) -> Tile {
        self.special_at(tile).map_or(tile, |special| special.target)
    }

    pub fn ladders(&self) -> impl Iterator<Item = (Tile, Tile)> + '_ {
        self.pairs(SpecialKind::Ladder)
    }

    pub fn snakes(&self) -> impl Iterator<Item = (Tile, Tile)> + '_ {
        self.pairs(SpecialKind::Snake)
    }

    fn pairs(&self, kind: SpecialKind) -> impl Iterator<Item = (Tile, Tile)> + '_ {
        Tile::all().filter_map(move |tile| match self.special_at(tile) {
            Some(special) if special.kind == kind => Some((tile, special.target)),
            _ => None,
        })
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for BoardTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardTopology")
            .field("ladders", &self.ladders().collect::<Vec<_>>())
            .field("snakes", &self.snakes().collect::<Vec<_>>())
            .finish()
    }
}
