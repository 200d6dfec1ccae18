//! Persisted session state.
//!
//! Two independently keyed JSON blobs:
//!
//! - `pieces`: `[[id, name, position, color], ...]`
//! - `starTiles`: `[tile, ...]`, ascending
//!
//! There is no version field; a blob that does not decode is reported as
//! [`PersistError::Json`].

mod store;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::registry::PieceRegistry;
use crate::stars::StarTileSet;
use crate::types::{Piece, PieceColor, PieceId, Tile};

pub use store::{DirStore, MemoryStore, StateStore};

/// Store key of the piece list
pub const PIECES_KEY: &str = "pieces";

/// Store key of the star tile list
pub const STARS_KEY: &str = "starTiles";

/// Stored form of one piece: `[id, name, position, color]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PieceRecord(PieceId, String, Tile, PieceColor);

impl From<&Piece> for PieceRecord {
    fn from(p: &Piece) -> Self {
        PieceRecord(p.id, p.name.clone(), p.position, p.color.clone())
    }
}

impl From<PieceRecord> for Piece {
    fn from(PieceRecord(id, name, position, color): PieceRecord) -> Self {
        Piece {
            id,
            name,
            position,
            color,
        }
    }
}

pub fn encode_pieces(pieces: &PieceRegistry) -> Result<String, PersistError> {
    let records: Vec<PieceRecord> = pieces.iter().map(PieceRecord::from).collect();
    serde_json::to_string(&records).map_err(|source| PersistError::Json {
        key: PIECES_KEY,
        source,
    })
}

pub fn decode_pieces(s: &str) -> Result<PieceRegistry, PersistError> {
    let records: Vec<PieceRecord> =
        serde_json::from_str(s).map_err(|source| PersistError::Json {
            key: PIECES_KEY,
            source,
        })?;
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if record.0.get() == 0 {
            return Err(PersistError::ZeroId);
        }
        if record.1.trim().is_empty() {
            return Err(PersistError::EmptyName(record.0));
        }
        if !seen.insert(record.0) {
            return Err(PersistError::DuplicateId(record.0));
        }
    }
    Ok(PieceRegistry::from_pieces(records.into_iter().map(Piece::from).collect()))
}

pub fn encode_stars(stars: &StarTileSet) -> Result<String, PersistError> {
    serde_json::to_string(&stars.to_vec()).map_err(|source| PersistError::Json {
        key: STARS_KEY,
        source,
    })
}

pub fn decode_stars(s: &str) -> Result<StarTileSet, PersistError> {
    let tiles: Vec<Tile> = serde_json::from_str(s).map_err(|source| PersistError::Json {
        key: STARS_KEY,
        source,
    })?;
    if let Some(&bad) = tiles.iter().find(|t| !t.is_star_eligible()) {
        return Err(PersistError::StarOutOfRange(bad));
    }
    let mut stars = StarTileSet::new();
    stars.replace(tiles);
    Ok(stars)
}

pub fn load_pieces(store: &dyn StateStore) -> Result<PieceRegistry, PersistError> {
    match store.load(PIECES_KEY)? {
        Some(s) => decode_pieces(&s),
        None => Ok(PieceRegistry::new()),
    }
}

pub fn load_stars(store: &dyn StateStore) -> Result<StarTileSet, PersistError> {
    match store.load(STARS_KEY)? {
        Some(s) => decode_stars(&s),
        None => Ok(StarTileSet::new()),
    }
}

pub fn save_pieces(store: &mut dyn StateStore, pieces: &PieceRegistry) -> Result<(), PersistError> {
    let s = encode_pieces(pieces)?;
    store.save(PIECES_KEY, &s)?;
    Ok(())
}

pub fn save_stars(store: &mut dyn StateStore, stars: &StarTileSet) -> Result<(), PersistError> {
    let s = encode_stars(stars)?;
    store.save(STARS_KEY, &s)?;
    Ok(())
}
