pub use board_2048::*;

pub mod ai;
pub mod direction;
pub mod event;
pub mod game;
pub mod heuristic;
pub mod logic;
pub mod spawn;
pub mod tracker;
