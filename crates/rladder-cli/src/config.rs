//! Console configuration (`rladder.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rladder_core::stars::DEFAULT_STAR_COUNT;
use rladder_core::{BoardTopology, Tile, TopologyError};
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rladder.toml";

/// Default persistence directory
pub const DEFAULT_STATE_DIR: &str = ".rladder";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the persisted pieces/star tiles
    pub state_dir: Option<PathBuf>,
    /// Seed for star/color generation (random when absent)
    pub seed: Option<u64>,
    pub stars: StarsConfig,
    /// Custom snakes and ladders; the standard board when absent
    pub board: Option<BoardConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StarsConfig {
    pub count: usize,
    pub min: u8,
    pub max: u8,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_STAR_COUNT,
            min: Tile::STAR_MIN.get(),
            max: Tile::STAR_MAX.get(),
        }
    }
}

impl StarsConfig {
    /// Generation bounds as tiles, clamped to the board.
    pub fn bounds(&self) -> (Tile, Tile) {
        (Tile::clamped(self.min as i64), Tile::clamped(self.max as i64))
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// (bottom, top) pairs
    pub ladders: Vec<(u8, u8)>,
    /// (head, tail) pairs
    pub snakes: Vec<(u8, u8)>,
}

impl Config {
    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }

    /// Explicit path if given, else `rladder.toml` in the working directory if it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Config> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() { Self::load(default) } else { Ok(Config::default()) }
            }
        }
    }

    pub fn topology(&self) -> Result<BoardTopology, TopologyError> {
        match &self.board {
            Some(board) => BoardTopology::from_pairs(&board.ladders, &board.snakes),
            None => Ok(BoardTopology::standard()),
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
    }
}
