//! Turn phases.

use serde::{Deserialize, Serialize};

use crate::core::Position;

/// Where the turn state machine currently stands.
///
/// ```text
/// setup -> place -> select -> move -> [second_move] -> build -> [second_build] -> select ...
///                      \        \                        \
///                       +--------+------------------------+--> game_over
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Session created, workers not yet on the board.
    #[default]
    Setup,
    /// Players are placing workers by hand.
    Place,
    /// Active player picks a worker.
    Select,
    /// Selected worker must move.
    Move,
    /// Artemis bonus move, skippable.
    SecondMove,
    /// Selected worker must build.
    Build,
    /// Demeter bonus build, skippable.
    SecondBuild,
    /// A winner exists. Terminal.
    GameOver,
}

impl Phase {
    /// Snake-case name used in status text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Place => "place",
            Phase::Select => "select",
            Phase::Move => "move",
            Phase::SecondMove => "second_move",
            Phase::Build => "build",
            Phase::SecondBuild => "second_build",
            Phase::GameOver => "game_over",
        }
    }

    /// Phases in which a god power may be switched on.
    #[must_use]
    pub const fn allows_power(self) -> bool {
        matches!(self, Phase::Select | Phase::Move | Phase::Build)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The bonus action in progress and what it must avoid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondAction {
    /// Second move may not return to `origin`, the square the turn started on.
    Move { origin: Position },
    /// Second build may not target `first`, the first build's square.
    Build { first: Position },
}

impl SecondAction {
    /// The square the bonus action may not use.
    #[must_use]
    pub const fn forbidden(self) -> Position {
        match self {
            SecondAction::Move { origin } => origin,
            SecondAction::Build { first } => first,
        }
    }
}
