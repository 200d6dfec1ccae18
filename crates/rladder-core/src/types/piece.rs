//! Pieces (teams) and their identity

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Tile;

/// Piece identity. Assigned by the registry, never reused below the current maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(u32);

impl PieceId {
    #[inline]
    pub const fn new(id: u32) -> PieceId {
        PieceId(id)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Id following this one, `None` once the id space is used up
    #[inline]
    pub const fn next(self) -> Option<PieceId> {
        match self.0.checked_add(1) {
            Some(n) => Some(PieceId(n)),
            None => None,
        }
    }
}

impl FromStr for PieceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PieceId)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Display color of a piece.
///
/// Opaque to the rules; the console and the persisted state carry it as-is
/// (normally a CSS hex color such as `#FF0000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceColor(String);

impl PieceColor {
    pub fn new(color: impl Into<String>) -> PieceColor {
        PieceColor(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Random `#RRGGBB` color (uppercase hex digits).
    pub fn random<R: Rng>(rng: &mut R) -> PieceColor {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            color.push(HEX[rng.random_range(0..HEX.len())] as char);
        }
        PieceColor(color)
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One team on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) name: String,
    pub(crate) position: Tile,
    pub(crate) color: PieceColor,
}

impl Piece {
    pub(crate) fn new(id: PieceId, name: String, color: PieceColor) -> Piece {
        Piece {
            id,
            name,
            position: Tile::FIRST,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Tile {
        self.position
    }

    #[inline]
    pub fn color(&self) -> &PieceColor {
        &self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_random_color_format() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..32 {
            let color = PieceColor::random(&mut rng);
            let s = color.as_str();
            assert_eq!(s.len(), 7);
            assert!(s.starts_with('#'));
            assert!(s[1..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_random_color_is_seeded() {
        let a = PieceColor::random(&mut Xoshiro256PlusPlus::seed_from_u64(99));
        let b = PieceColor::random(&mut Xoshiro256PlusPlus::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_piece_starts_on_first_tile() {
        let piece = Piece::new(PieceId::new(3), "Alpha".into(), PieceColor::new("#ff0000"));
        assert_eq!(piece.position(), Tile::FIRST);
        assert_eq!(piece.id().next(), Some(PieceId::new(4)));
        assert_eq!(PieceId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_piece_id_display_honors_width() {
        assert_eq!(format!("{:>3}", PieceId::new(7)), "  7");
    }
}
