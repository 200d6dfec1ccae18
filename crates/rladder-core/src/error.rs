//! Error types for session operations.
//!
//! No error here is fatal: callers either surface them to the user or drop
//! them, and the session state is left untouched whenever one is returned.

use crate::types::{PieceId, Tile};

/// A number offered as a board tile was not one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("tile {0} is outside 1..=100")]
    OutOfRange(i64),

    #[error("not a tile number: {0:?}")]
    Parse(String),
}

/// Errors returned by registry and movement operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Name is empty after trimming; the request was ignored
    #[error("piece name must not be empty")]
    EmptyName,

    /// No piece with this id
    #[error("piece {0} not found")]
    NotFound(PieceId),

    /// The highest possible id is already taken
    #[error("no piece id left")]
    IdsExhausted,
}

/// Invalid custom board topology.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error(transparent)]
    Tile(#[from] TileError),

    #[error("tile {0} is both a ladder bottom and a snake head")]
    Overlap(Tile),

    #[error("tile {0} has more than one destination")]
    Duplicate(Tile),

    #[error("tile {from} leads to {to}, which is itself a snake or ladder")]
    Chained { from: Tile, to: Tile },

    #[error("ladder {bottom} -> {top} does not climb")]
    LadderNotUp { bottom: Tile, top: Tile },

    #[error("snake {head} -> {tail} does not descend")]
    SnakeNotDown { head: Tile, tail: Tile },

    #[error("tile {0} cannot start a snake or ladder")]
    ReservedTile(Tile),
}

/// Persistence failure (store I/O or malformed blob).
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed {key} state: {source}")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate piece id {0} in stored state")]
    DuplicateId(PieceId),

    #[error("stored piece id must be at least 1")]
    ZeroId,

    #[error("stored piece {0} has an empty name")]
    EmptyName(PieceId),

    #[error("stored star tile {0} is outside 2..=99")]
    StarOutOfRange(Tile),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
