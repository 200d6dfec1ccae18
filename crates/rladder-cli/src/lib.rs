//! rladder game-master console library

pub mod command;
pub mod config;
pub mod console;
pub mod render;
