//! Board tiles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TileError;

/// Board tile number (1..=100).
///
/// Every position in a session is a `Tile`, so an out-of-range position cannot
/// be represented once a value has passed through [`Tile::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tile(u8);

impl Tile {
    /// Number of tiles on the board
    pub const NUM: usize = 100;

    /// Start tile
    pub const FIRST: Tile = Tile(1);

    /// Goal tile
    pub const LAST: Tile = Tile(100);

    /// Lowest tile that may carry a star
    pub const STAR_MIN: Tile = Tile(2);

    /// Highest tile that may carry a star
    pub const STAR_MAX: Tile = Tile(99);

    /// Build a tile from its board number.
    #[inline]
    pub const fn new(n: u8) -> Option<Tile> {
        if n >= 1 && n as usize <= Self::NUM { Some(Tile(n)) } else { None }
    }

    /// Build a tile by clamping an arbitrary signed number into 1..=100.
    #[inline]
    pub fn clamped(n: i64) -> Tile {
        Tile(n.clamp(Self::FIRST.0 as i64, Self::LAST.0 as i64) as u8)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 0-based index, for array access
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Whether a star may be placed here (tiles 1 and 100 are excluded).
    #[inline]
    pub const fn is_star_eligible(self) -> bool {
        self.0 >= Self::STAR_MIN.0 && self.0 <= Self::STAR_MAX.0
    }

    /// All tiles from 1 to 100
    pub fn all() -> impl DoubleEndedIterator<Item = Tile> {
        (Self::FIRST.0..=Self::LAST.0).map(Tile)
    }
}

impl TryFrom<u8> for Tile {
    type Error = TileError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Tile::new(n).ok_or(TileError::OutOfRange(n as i64))
    }
}

impl TryFrom<i64> for Tile {
    type Error = TileError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        u8::try_from(n).ok().and_then(Tile::new).ok_or(TileError::OutOfRange(n))
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile.0
    }
}

impl FromStr for Tile {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s.trim().parse().map_err(|_| TileError::Parse(s.to_string()))?;
        Tile::try_from(n)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_new_bounds() {
        assert_eq!(Tile::new(0), None);
        assert_eq!(Tile::new(1), Some(Tile::FIRST));
        assert_eq!(Tile::new(100), Some(Tile::LAST));
        assert_eq!(Tile::new(101), None);
    }

    #[test]
    fn test_tile_clamped() {
        assert_eq!(Tile::clamped(-40).get(), 1);
        assert_eq!(Tile::clamped(0).get(), 1);
        assert_eq!(Tile::clamped(57).get(), 57);
        assert_eq!(Tile::clamped(250).get(), 100);
    }

    #[test]
    fn test_tile_star_eligible() {
        assert!(!Tile::FIRST.is_star_eligible());
        assert!(!Tile::LAST.is_star_eligible());
        assert!(Tile::new(2).unwrap().is_star_eligible());
        assert!(Tile::new(99).unwrap().is_star_eligible());
    }

    #[test]
    fn test_tile_from_str() {
        assert_eq!(" 42 ".parse::<Tile>().unwrap().get(), 42);
        assert_eq!("101".parse::<Tile>(), Err(TileError::OutOfRange(101)));
        assert_eq!("-3".parse::<Tile>(), Err(TileError::OutOfRange(-3)));
        assert!(matches!("x".parse::<Tile>(), Err(TileError::Parse(_))));
    }

    #[test]
    fn test_tile_display_honors_width() {
        let tile = Tile::new(25).unwrap();
        assert_eq!(format!("{tile:>3}"), " 25");
        assert_eq!(format!("{tile:<4}|"), "25  |");
    }

    #[test]
    fn test_tile_serde_rejects_out_of_range() {
        assert_eq!(serde_json::from_str::<Tile>("7").unwrap().get(), 7);
        assert!(serde_json::from_str::<Tile>("0").is_err());
        assert_eq!(serde_json::to_string(&Tile::LAST).unwrap(), "100");
    }

    #[test]
    fn test_tile_all() {
        let tiles: Vec<u8> = Tile::all().map(Tile::get).collect();
        assert_eq!(tiles.len(), Tile::NUM);
        assert_eq!(tiles.first(), Some(&1));
        assert_eq!(tiles.last(), Some(&100));
    }
}
