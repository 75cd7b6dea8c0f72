//! Error types.
//!
//! Two families, kept apart on purpose:
//!
//! - [`BoardError`]: a coordinate that is not on the board reached a board
//!   query. That is a bug in whoever built the coordinate.
//! - [`Rejection`]: a command the engine refused. These are ordinary
//!   outcomes of play; the `Display` text is the status line for the UI.
//!   A rejected command never changes state.

use thiserror::Error;

use super::player::PlayerId;
use super::position::Position;

/// Board query failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinate lies outside the 5x5 grid.
    #[error("position {0} is off the board")]
    OutOfBounds(Position),
}

/// Why the engine refused a command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The game already has a winner; only a new session is accepted.
    #[error("the game is over")]
    GameOver,

    /// Command does not apply to the current phase.
    #[error("cannot do that during the {0} phase")]
    WrongPhase(&'static str),

    /// Coordinate off the board.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Clicked square is not one of the active player's workers.
    #[error("select your own worker")]
    NoWorkerThere,

    /// Clicked an opponent's worker during selection.
    #[error("that's {0}'s worker, select your own worker")]
    OpponentWorker(String),

    /// Selected worker cannot move anywhere.
    #[error("worker {0} has no valid moves")]
    WorkerStuck(String),

    /// Square is occupied, domed or otherwise unavailable for placement.
    #[error("cannot place a worker at {0}")]
    PlacementBlocked(Position),

    /// Destination not in the legal move set.
    #[error("invalid move to {0}, choose a highlighted position")]
    IllegalMove(Position),

    /// Target not in the legal build set.
    #[error("invalid build at {0}, choose a highlighted position")]
    IllegalBuild(Position),

    /// Command issued on behalf of the player who is not on turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// Seat index that names neither player.
    #[error("there is no player {0}")]
    UnknownSeat(usize),

    /// Player holds no god card.
    #[error("{0} doesn't have a god card")]
    NoGodCard(String),

    /// Power may only be switched on during select, move or build.
    #[error("cannot use god power during the {0} phase")]
    PowerUnavailable(&'static str),

    /// Power was already switched on this turn.
    #[error("god power already activated for this turn")]
    PowerAlreadyActive,

    /// The card's precondition does not hold right now.
    #[error("{0} power cannot be used right now")]
    PowerNotApplicable(&'static str),

    /// `skip` outside the bonus-action phases.
    #[error("there is no bonus action to skip")]
    NothingToSkip,

    /// Hint pool exhausted.
    #[error("all hints for {0} have been used")]
    NoHintsRemaining(String),

    /// Advisor found no candidate; no credit was spent.
    #[error("no hint available for the current situation")]
    NoSuggestion,
}
