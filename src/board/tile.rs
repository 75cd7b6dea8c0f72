//! A single board square: its building level and who stands on it.

use serde::{Deserialize, Serialize};

use crate::pieces::WorkerId;

/// Building level of a tile.
///
/// Levels only go up, one step per build. `Dome` is terminal: it is never
/// built on and never stood on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// No building.
    #[default]
    Ground,
    /// One block.
    Level1,
    /// Two blocks.
    Level2,
    /// Three blocks. Stepping up onto this wins.
    Level3,
    /// Capped tower.
    Dome,
}

impl Level {
    /// Numeric height, `0..=4`.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Level::Ground => 0,
            Level::Level1 => 1,
            Level::Level2 => 2,
            Level::Level3 => 3,
            Level::Dome => 4,
        }
    }

    /// Level for a numeric height, if one exists.
    #[must_use]
    pub const fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Level::Ground),
            1 => Some(Level::Level1),
            2 => Some(Level::Level2),
            3 => Some(Level::Level3),
            4 => Some(Level::Dome),
            _ => None,
        }
    }

    /// The level one build above this one. `None` on a dome.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_value(self.value() + 1)
    }

    /// Is this the terminal dome level?
    #[must_use]
    pub const fn is_dome(self) -> bool {
        matches!(self, Level::Dome)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Dome => write!(f, "DOME"),
            other => write!(f, "Level {}", other.value()),
        }
    }
}

/// One square of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    level: Level,
    occupant: Option<WorkerId>,
}

impl Tile {
    /// An empty ground-level tile.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: Level::Ground,
            occupant: None,
        }
    }

    /// An empty tile pre-built to `level`.
    #[must_use]
    pub const fn with_level(level: Level) -> Self {
        Self { level, occupant: None }
    }

    /// Current building level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Numeric height, shorthand for `level().value()`.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.level.value()
    }

    /// Worker standing here, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<WorkerId> {
        self.occupant
    }

    /// Is a worker standing here?
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Is the tile capped?
    #[must_use]
    pub const fn is_dome(&self) -> bool {
        self.level.is_dome()
    }

    /// Is this tile strictly taller than `other`?
    #[must_use]
    pub const fn is_higher_than(&self, other: &Tile) -> bool {
        self.level.value() > other.level.value()
    }

    /// Raise an empty tile by one level.
    ///
    /// Fails on an occupied tile or a dome. Level 3 becomes a dome.
    pub fn build(&mut self) -> bool {
        if self.is_occupied() {
            return false;
        }
        self.raise()
    }

    /// Raise the tile a worker is standing on.
    ///
    /// Only legal below level 3: an occupied tile can never become a dome.
    pub fn build_beneath(&mut self) -> bool {
        if self.level.value() >= Level::Level3.value() {
            return false;
        }
        self.raise()
    }

    fn raise(&mut self) -> bool {
        match self.level.next() {
            Some(next) => {
                self.level = next;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<WorkerId>) {
        self.occupant = occupant;
    }
}

/// Shows the occupant by seat letter; [`Board`](super::Board) renders names.
impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.occupant, self.level) {
            (_, Level::Dome) => write!(f, "D"),
            (Some(worker), level) => write!(f, "{}{}", worker, level.value()),
            (None, level) => write!(f, "{}", level.value()),
        }
    }
}
