//! Core types: coordinates, seats, RNG, configuration, errors.
//!
//! Nothing in here knows the rules of the game. The board, pieces and
//! engine build on top of these.

pub mod position;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{Position, BOARD_SIZE};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{Placement, SessionConfig};
pub use error::{BoardError, Rejection};
