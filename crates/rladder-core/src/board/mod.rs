//! Board: snake/ladder topology and tile layout

pub mod layout;
mod topology;

pub use topology::{
    BoardTopology, STANDARD_LADDERS, STANDARD_SNAKES, Special, SpecialKind,
};
