//! The playing surface.
//!
//! - `tile`: a square's level and occupant
//! - `grid`: the 5x5 board, adjacency and legality queries
//!
//! The board only stores which worker stands where. Worker bookkeeping
//! (current and previous position) lives on the `Worker` itself and is
//! kept in sync by [`Board::place_worker`].

pub mod tile;
pub mod grid;

pub use tile::{Level, Tile};
pub use grid::{Board, Positions};
