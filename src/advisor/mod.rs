//! Move suggestions.
//!
//! Advisors are trait-based so the engine can be handed a different one:
//! - `Advisor`: proposes the next action for the active phase
//! - `HeuristicAdvisor`: the built-in greedy scorer
//!
//! An advisor never mutates anything and never spends hint credits; the
//! engine does the accounting.

pub mod heuristic;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::Position;
use crate::pieces::{Player, Worker, WorkerId};
use crate::rules::Phase;

pub use heuristic::HeuristicAdvisor;

/// A proposed next action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suggestion {
    /// Pick this worker.
    Select { worker: WorkerId, at: Position },
    /// Step the selected worker here.
    Move { to: Position },
    /// Build here with the selected worker.
    Build { at: Position },
}

impl Suggestion {
    /// Square the suggestion points at, for highlighting.
    #[must_use]
    pub fn position(&self) -> Position {
        match *self {
            Suggestion::Select { at, .. } | Suggestion::Build { at } => at,
            Suggestion::Move { to } => to,
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suggestion::Select { worker, .. } => write!(f, "Select worker {worker}"),
            Suggestion::Move { to } => write!(f, "Move to position {to}"),
            Suggestion::Build { at } => write!(f, "Build at position {at}"),
        }
    }
}

/// Read-only view of the position an advisor works from.
#[derive(Clone, Copy, Debug)]
pub struct AdviceContext<'a> {
    pub board: &'a Board,
    pub phase: Phase,
    /// The player asking.
    pub player: &'a Player,
    /// Worker chosen this turn, once there is one.
    pub selected: Option<&'a Worker>,
    /// Legal targets for the current phase, in neighbourhood order.
    pub targets: &'a [Position],
}

/// Source of suggestions.
pub trait Advisor: Send + std::fmt::Debug {
    /// Best next action, or `None` when there is nothing to suggest.
    fn propose(&self, ctx: &AdviceContext<'_>) -> Option<Suggestion>;
}
