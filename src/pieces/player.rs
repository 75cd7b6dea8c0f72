//! Players: a name, a colour, two workers, a god card and a hint pool.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::worker::{Worker, WorkerId};
use crate::cards::GodCard;
use crate::core::{PlayerId, Position};

/// Workers per player.
pub const WORKERS_PER_PLAYER: usize = 2;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: Color,
    workers: [Worker; WORKERS_PER_PLAYER],
    god_card: GodCard,
    hints_remaining: u8,
}

impl Player {
    /// Seat a player. Workers are named after the first letter of `name`.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: Color,
        god_card: GodCard,
        hints: u8,
    ) -> Self {
        let name = name.into();
        let initial = name.chars().next().unwrap_or('?');
        let workers = [0u8, 1].map(|slot| {
            Worker::new(WorkerId::new(id, slot), format!("{}{}", initial, slot + 1))
        });

        Self {
            id,
            name,
            color,
            workers,
            god_card,
            hints_remaining: hints,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Shade used for this player's pieces.
    #[must_use]
    pub fn dark_color(&self) -> Color {
        self.color.darker()
    }

    #[must_use]
    pub fn god_card(&self) -> GodCard {
        self.god_card
    }

    #[must_use]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Worker in `slot`, if the slot exists.
    #[must_use]
    pub fn worker(&self, slot: usize) -> Option<&Worker> {
        self.workers.get(slot)
    }

    pub(crate) fn worker_mut(&mut self, slot: usize) -> Option<&mut Worker> {
        self.workers.get_mut(slot)
    }

    /// Positions of placed workers, in slot order.
    pub fn worker_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.workers.iter().filter_map(Worker::position)
    }

    /// First worker not yet on the board.
    #[must_use]
    pub fn next_unplaced(&self) -> Option<WorkerId> {
        self.workers.iter().find(|w| !w.is_placed()).map(Worker::id)
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    /// Spend one hint. Returns false, spending nothing, when the pool is empty.
    pub(crate) fn consume_hint(&mut self) -> bool {
        match self.hints_remaining.checked_sub(1) {
            Some(left) => {
                self.hints_remaining = left;
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
