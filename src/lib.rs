//! # santorini-rules
//!
//! Rules engine for a two-player, 5x5 Santorini-style building game with
//! god powers, a per-player chess clock and a hint advisor.
//!
//! ## Design Principles
//!
//! 1. **One owner**: a session's `Engine` owns the board, players, clock
//!    and advisor. Nothing is global; a new game is a new `Engine`.
//!
//! 2. **Refusals are values**: every command returns `Result<_, Rejection>`.
//!    A rejected command changes nothing.
//!
//! 3. **Closed card set**: god cards are an enum and the engine matches on
//!    it exhaustively.
//!
//! ## Modules
//!
//! - `core`: coordinates, seats, RNG, configuration, errors
//! - `board`: levels, tiles and the 5x5 board with its legality queries
//! - `pieces`: workers, players and their colours
//! - `cards`: god cards and the per-session deal
//! - `rules`: moves, builds, phases, events and the `Engine`
//! - `clock`: background countdown feeding the engine through a channel
//! - `advisor`: the `Advisor` trait and the built-in heuristic
//! - `session`: entry points and snapshots for a rendering surface

pub mod core;
pub mod board;
pub mod pieces;
pub mod cards;
pub mod rules;
pub mod clock;
pub mod advisor;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Position, BOARD_SIZE,
    PlayerId, PlayerMap,
    GameRng,
    Placement, SessionConfig,
    BoardError, Rejection,
};

pub use crate::board::{Board, Level, Tile};

pub use crate::pieces::{Color, Player, Worker, WorkerId};

pub use crate::cards::{CardDeal, GodCard};

pub use crate::rules::{
    Action, ActionRecord, Build, BuildRules, Move, MoveRules,
    Engine, EngineBuilder, EngineEvent, GameOutcome, Phase, SecondAction, WinReason,
};

pub use crate::clock::{Clock, ClockEvent, TimeWarning};

pub use crate::advisor::{AdviceContext, Advisor, HeuristicAdvisor, Suggestion};

pub use crate::session::{EventObserver, Session, SessionRequest, Snapshot};
