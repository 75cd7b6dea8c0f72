//! Session configuration.
//!
//! Everything that varies between sessions without changing the rules:
//! clock budget and polling, hint pool size, how workers reach the board,
//! and the RNG seed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::position::Position;

/// How the four workers get onto the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Shuffle all 25 squares and drop the workers in seat order.
    Random,
    /// Run the `place` phase: one click per worker, first seat first.
    Manual,
    /// Place at the given squares: first seat's two workers, then the second's.
    Fixed([Position; 4]),
}

/// Per-session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Thinking time per player.
    pub clock_budget: Duration,

    /// How often the background timer wakes up to check for expiry.
    pub poll_interval: Duration,

    /// Whether the clock runs at all.
    pub clock_enabled: bool,

    /// Hints each player may use over the whole session.
    pub hint_credits: u8,

    /// Worker placement policy.
    pub placement: Placement,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clock_budget: Duration::from_secs(15 * 60),
            poll_interval: Duration::from_millis(100),
            clock_enabled: true,
            hint_credits: 3,
            placement: Placement::Random,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set the per-player clock budget.
    #[must_use]
    pub fn with_clock_budget(mut self, budget: Duration) -> Self {
        self.clock_budget = budget;
        self
    }

    /// Set the timer polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Turn the clock off entirely.
    #[must_use]
    pub fn without_clock(mut self) -> Self {
        self.clock_enabled = false;
        self
    }

    /// Set the hint pool size.
    #[must_use]
    pub fn with_hint_credits(mut self, credits: u8) -> Self {
        self.hint_credits = credits;
        self
    }

    /// Set the placement policy.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
