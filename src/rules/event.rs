//! What the engine tells the outside world.
//!
//! The engine queues an event for every state change and every refusal.
//! The rendering surface drains them (directly via `Engine::take_events`
//! or through session observers) and never has to poke at engine
//! internals to find out what happened.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::phase::Phase;
use crate::advisor::Suggestion;
use crate::board::Level;
use crate::cards::GodCard;
use crate::core::{PlayerId, Position};
use crate::pieces::WorkerId;

/// How a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// Winner stepped up onto level 3.
    Height,
    /// Loser had no legal move at the start of their turn.
    Stalemate,
    /// Loser's clock ran out.
    Timeout,
}

impl std::fmt::Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WinReason::Height => "reached level 3",
            WinReason::Stalemate => "opponent has no valid moves",
            WinReason::Timeout => "opponent ran out of time",
        })
    }
}

/// Final result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub reason: WinReason,
}

impl GameOutcome {
    /// The seat that lost.
    #[must_use]
    pub fn loser(&self) -> PlayerId {
        self.winner.opponent()
    }
}

/// A notification for the rendering surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Human-readable status line.
    Status(String),
    /// A command was refused; nothing changed.
    Rejected { message: String },
    WorkerPlaced { worker: WorkerId, at: Position },
    PhaseChanged { phase: Phase },
    TurnStarted { player: PlayerId, turn: u32 },
    WorkerSelected { worker: WorkerId, at: Position },
    WorkerMoved { worker: WorkerId, from: Position, to: Position },
    Built { worker: WorkerId, at: Position, level: Level },
    PowerActivated { player: PlayerId, card: GodCard },
    HintGiven { player: PlayerId, suggestion: Suggestion, remaining: u8 },
    ClockTick { player: PlayerId, remaining: Duration },
    GameOver(GameOutcome),
}
