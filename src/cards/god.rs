//! God cards.
//!
//! A closed set of variants. A card never performs anything itself; it
//! only answers whether its bonus is currently available, and the engine
//! matches on the variant to decide which bonus phase to offer.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Level};
use crate::pieces::Worker;

/// A player's god card for the whole session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GodCard {
    /// No power.
    #[default]
    None,
    /// May move one additional time, but not back to the starting square.
    Artemis,
    /// May build one additional time, but not on the same square.
    Demeter,
    /// May build a block under itself.
    Zeus,
}

impl GodCard {
    /// The cards that carry a power.
    pub const SPECIAL: [GodCard; 3] = [GodCard::Artemis, GodCard::Demeter, GodCard::Zeus];

    /// Card name as printed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GodCard::None => "None",
            GodCard::Artemis => "Artemis",
            GodCard::Demeter => "Demeter",
            GodCard::Zeus => "Zeus",
        }
    }

    /// Does this card carry a power at all?
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, GodCard::None)
    }

    /// Could `worker` use this card's bonus on `board` right now?
    ///
    /// - Artemis: a legal step exists other than back to the previous square.
    /// - Demeter: more than one legal build exists.
    /// - Zeus: the worker's own square is below level 3.
    ///
    /// Always false for an unplaced worker.
    #[must_use]
    pub fn can_activate(self, worker: &Worker, board: &Board) -> bool {
        let Some(pos) = worker.position() else {
            return false;
        };

        match self {
            GodCard::None => false,
            GodCard::Artemis => board
                .valid_moves(pos, false)
                .map(|moves| moves.iter().any(|&m| Some(m) != worker.previous_position()))
                .unwrap_or(false),
            GodCard::Demeter => board
                .valid_builds(pos)
                .map(|builds| builds.len() > 1)
                .unwrap_or(false),
            GodCard::Zeus => board
                .tile(pos)
                .map(|t| !t.is_dome() && t.height() < Level::Level3.value())
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Display for GodCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
