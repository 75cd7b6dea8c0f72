//! Pieces and the people who own them.

pub mod color;
pub mod worker;
pub mod player;

pub use color::{Color, ColorParseError, CYAN, MAGENTA};
pub use worker::{Worker, WorkerId};
pub use player::{Player, WORKERS_PER_PLAYER};
