//! Workers: the pieces that move and build.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Position};

/// Stable identity of a worker: owning seat plus slot (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId {
    owner: PlayerId,
    slot: u8,
}

impl WorkerId {
    /// Create a worker id.
    #[must_use]
    pub const fn new(owner: PlayerId, slot: u8) -> Self {
        Self { owner, slot }
    }

    /// Seat that owns this worker. Never changes.
    #[must_use]
    pub const fn owner(self) -> PlayerId {
        self.owner
    }

    /// Slot within the owner's pair.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot as usize
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seat = char::from(b'A' + self.owner.0);
        write!(f, "{}{}", seat, self.slot + 1)
    }
}

/// A worker and where it stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    id: WorkerId,
    name: String,
    position: Option<Position>,
    previous_position: Option<Position>,
}

impl Worker {
    /// A new, unplaced worker.
    pub fn new(id: WorkerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: None,
            previous_position: None,
        }
    }

    /// Identity.
    #[must_use]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Owning seat.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.id.owner()
    }

    /// Display name, e.g. `"A1"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current square; `None` until placed.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Square occupied before the last successful relocation.
    #[must_use]
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// Has this worker been put on the board?
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    // Only the board may call this; it keeps tile occupancy in step.
    pub(crate) fn relocate(&mut self, to: Position) {
        self.previous_position = self.position;
        self.position = Some(to);
    }
}

impl std::fmt::Display for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
