//! Moves and builds.
//!
//! An action can only be obtained from `propose`, which checks it against
//! the current board. `execute` checks again before mutating anything, since
//! the board may have changed in between. Illegality is reported as
//! `None`/`false`, never as an error: it is an expected outcome of play.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Level, Positions};
use crate::core::{BoardError, PlayerId, Position};
use crate::pieces::{Worker, WorkerId};

/// Extra constraints on a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRules {
    /// Forbid stepping up at all.
    pub restrict_upward: bool,
    /// A square that would otherwise be legal but is off-limits.
    pub forbidden: Option<Position>,
}

/// Extra constraints on a build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRules {
    /// The builder's own square is a legal target (below level 3).
    pub beneath_allowed: bool,
    /// A square that would otherwise be legal but is off-limits.
    pub forbidden: Option<Position>,
}

/// A worker stepping to an adjacent square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    worker: WorkerId,
    from: Position,
    to: Position,
    rules: MoveRules,
    winning: bool,
}

impl Move {
    /// Every square a worker on `from` may step to under `rules`.
    pub fn legal_targets(
        board: &Board,
        from: Position,
        rules: MoveRules,
    ) -> Result<Positions, BoardError> {
        let mut targets = board.valid_moves(from, rules.restrict_upward)?;
        if let Some(forbidden) = rules.forbidden {
            targets.retain(|p| *p != forbidden);
        }
        Ok(targets)
    }

    /// A move of `worker` to `to`, if currently legal.
    #[must_use]
    pub fn propose(board: &Board, worker: &Worker, to: Position, rules: MoveRules) -> Option<Self> {
        let from = worker.position()?;
        let targets = Self::legal_targets(board, from, rules).ok()?;
        targets.contains(&to).then_some(Self {
            worker: worker.id(),
            from,
            to,
            rules,
            winning: false,
        })
    }

    /// Carry out the move.
    ///
    /// Re-validates against the current board. On success, records whether
    /// the worker stepped onto level 3.
    pub fn execute(&mut self, board: &mut Board, worker: &mut Worker) -> bool {
        if worker.id() != self.worker || worker.position() != Some(self.from) {
            return false;
        }
        let still_legal = Self::legal_targets(board, self.from, self.rules)
            .map(|targets| targets.contains(&self.to))
            .unwrap_or(false);
        if !still_legal || !board.place_worker(worker, self.to) {
            return false;
        }

        self.winning = board
            .tile(self.to)
            .map(|t| t.level() == Level::Level3)
            .unwrap_or(false);
        true
    }

    #[must_use]
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    #[must_use]
    pub fn from(&self) -> Position {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> Position {
        self.to
    }

    /// Did executing this move reach level 3?
    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.winning
    }
}

/// A worker raising an adjacent square (or its own, under Zeus).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    worker: WorkerId,
    from: Position,
    target: Position,
    rules: BuildRules,
}

impl Build {
    /// Every square a worker on `from` may build on under `rules`.
    pub fn legal_targets(
        board: &Board,
        from: Position,
        rules: BuildRules,
    ) -> Result<Positions, BoardError> {
        let mut targets = if rules.beneath_allowed {
            board.valid_builds_including_self(from)?
        } else {
            board.valid_builds(from)?
        };
        if let Some(forbidden) = rules.forbidden {
            targets.retain(|p| *p != forbidden);
        }
        Ok(targets)
    }

    /// A build by `worker` at `target`, if currently legal.
    #[must_use]
    pub fn propose(
        board: &Board,
        worker: &Worker,
        target: Position,
        rules: BuildRules,
    ) -> Option<Self> {
        let from = worker.position()?;
        let targets = Self::legal_targets(board, from, rules).ok()?;
        targets.contains(&target).then_some(Self {
            worker: worker.id(),
            from,
            target,
            rules,
        })
    }

    /// Carry out the build. Re-validates against the current board.
    pub fn execute(&self, board: &mut Board) -> bool {
        let still_legal = Self::legal_targets(board, self.from, self.rules)
            .map(|targets| targets.contains(&self.target))
            .unwrap_or(false);
        if !still_legal {
            return false;
        }

        let built = if self.is_beneath() {
            board.build_beneath(self.target)
        } else {
            board.build(self.target)
        };
        built.unwrap_or(false)
    }

    #[must_use]
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    /// Is the worker building under itself?
    #[must_use]
    pub fn is_beneath(&self) -> bool {
        self.target == self.from
    }
}

/// An executed action, as kept in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move(Move),
    Build(Build),
}

/// An executed action with bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// What they did.
    pub action: Action,

    /// Turn number when it happened.
    pub turn: u32,

    /// Position within the whole session's history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
