//! Game rules and the turn state machine.
//!
//! - `phase`: where the turn stands and what a bonus action forbids
//! - `action`: validated moves and builds, plus the history record
//! - `event`: notifications queued for the rendering surface
//! - `engine`: the session state machine that ties it all together

pub mod action;
pub mod engine;
pub mod event;
pub mod phase;

pub use action::{Action, ActionRecord, Build, BuildRules, Move, MoveRules};
pub use engine::{Engine, EngineBuilder, PlayerSpec};
pub use event::{EngineEvent, GameOutcome, WinReason};
pub use phase::{Phase, SecondAction};
