//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. `PlayerId(0)` moves first.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by a two-element array, indexable by `PlayerId`.
//! Used for clock budgets, hint pools and the players themselves.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier, `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The seat that starts the game.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The seat that moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a seat id from a 0-based index, if it names a seat.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PLAYER_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Both seats in turn order.
    ///
    /// ```
    /// use santorini_rules::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(seats, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use santorini_rules::core::{PlayerId, PlayerMap};
///
/// let mut hints: PlayerMap<u8> = PlayerMap::with_value(3);
/// hints[PlayerId::SECOND] -= 1;
/// assert_eq!(hints[PlayerId::FIRST], 3);
/// assert_eq!(hints[PlayerId::SECOND], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a map from explicit per-seat values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerId, &T)` pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
