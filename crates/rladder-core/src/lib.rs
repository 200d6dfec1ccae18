//! # rladder-core
//!
//! Session state for a multi-team Snakes and Ladders board.
//!
//! ## Modules
//!
//! - `types`: basic types (Tile, PieceId, PieceColor, Piece)
//! - `board`: snakes, ladders and the board layout
//! - `registry`: adding, editing and removing teams
//! - `stars`: star tiles
//! - `movement`: move resolution (clamping, star detection, snakes and ladders)
//! - `history`: move history for undo
//! - `session`: the session state tying the above together
//! - `persist`: saving and restoring state
//!

pub mod board;
pub mod error;
pub mod history;
pub mod movement;
pub mod persist;
pub mod registry;
pub mod session;
pub mod stars;
pub mod types;

pub use board::{BoardTopology, Special, SpecialKind};
pub use error::{PersistError, SessionError, SessionResult, TileError, TopologyError};
pub use history::{MoveHistory, MoveRecord};
pub use movement::{MoveOutcome, MoveRequest, MovementResolver, StarContact, StarEvent};
pub use persist::{DirStore, MemoryStore, StateStore};
pub use registry::PieceRegistry;
pub use session::GameSession;
pub use stars::StarTileSet;
pub use types::{Piece, PieceColor, PieceId, Tile};
