//! Star tiles.

use std::collections::BTreeSet;

use log::debug;
use rand::Rng;
use rand::seq::index;

use crate::types::Tile;

/// Default number of stars drawn by [`StarTileSet::random_generate`]
pub const DEFAULT_STAR_COUNT: usize = 10;

/// Set of star tiles, always iterated in ascending order.
///
/// Only tiles 2..=99 are admitted; anything else offered to `add`/`replace`
/// is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarTileSet {
    tiles: BTreeSet<Tile>,
}

impl StarTileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union with `tiles`.
    pub fn add<I: IntoIterator<Item = Tile>>(&mut self, tiles: I) {
        for tile in tiles {
            if tile.is_star_eligible() {
                self.tiles.insert(tile);
            } else {
                debug!("ignoring star on reserved tile {tile}");
            }
        }
    }

    /// Overwrite with `tiles`.
    pub fn replace<I: IntoIterator<Item = Tile>>(&mut self, tiles: I) {
        self.tiles.clear();
        self.add(tiles);
    }

    /// Remove one tile. Returns false if it was not a star.
    pub fn remove(&mut self, tile: Tile) -> bool {
        self.tiles.remove(&tile)
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Tile> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Replace the set with `count` distinct tiles drawn uniformly from `min..=max`.
    ///
    /// The bounds are narrowed to 2..=99 and `count` is capped at the size of
    /// the range, so the draw always terminates.
    pub fn random_generate<R: Rng>(&mut self, rng: &mut R, count: usize, min: Tile, max: Tile) {
        let lo = min.max(Tile::STAR_MIN);
        let hi = max.min(Tile::STAR_MAX);
        if lo > hi {
            debug!("empty star range {min}..={max}");
            self.clear();
            return;
        }
        let span = (hi.get() - lo.get()) as usize + 1;
        let count = count.min(span);

        let picked = index::sample(rng, span, count)
            .into_iter()
            .filter_map(|offset| Tile::new(lo.get() + offset as u8));
        self.replace(picked);
    }
}
