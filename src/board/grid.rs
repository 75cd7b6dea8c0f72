//! The 5x5 board and its legality queries.
//!
//! Every query that takes a coordinate fails with
//! [`BoardError::OutOfBounds`] when the coordinate is off the board; none
//! of them silently return an empty answer for bad input.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::tile::{Level, Tile};
use crate::core::{BoardError, Position, BOARD_SIZE};
use crate::pieces::{Worker, WorkerId};

/// A small set of board coordinates, in neighbourhood order.
///
/// Eight neighbours plus, for builds beneath oneself, the centre square.
pub type Positions = SmallVec<[Position; 9]>;

/// The game board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: [[Tile; BOARD_SIZE]; BOARD_SIZE],
    /// Names of every worker ever placed, for the text grid.
    names: SmallVec<[(WorkerId, String); 4]>,
}

impl Board {
    /// An empty ground-level board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty board with the given pre-built levels.
    ///
    /// Useful for puzzles and tests. Occupancy always starts empty.
    #[must_use]
    pub fn with_levels(levels: [[Level; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self {
            tiles: levels.map(|row| row.map(Tile::with_level)),
            names: SmallVec::new(),
        }
    }

    /// True iff both coordinates lie in `[0, 5)`.
    #[must_use]
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.is_on_board()
    }

    /// The tile at `pos`.
    pub fn tile(&self, pos: Position) -> Result<&Tile, BoardError> {
        let (r, c) = pos.indices().ok_or(BoardError::OutOfBounds(pos))?;
        Ok(&self.tiles[r][c])
    }

    fn tile_mut(&mut self, pos: Position) -> Result<&mut Tile, BoardError> {
        let (r, c) = pos.indices().ok_or(BoardError::OutOfBounds(pos))?;
        Ok(&mut self.tiles[r][c])
    }

    /// Worker standing at `pos`, if any.
    pub fn occupant(&self, pos: Position) -> Result<Option<WorkerId>, BoardError> {
        Ok(self.tile(pos)?.occupant())
    }

    /// On-board squares of the Moore neighbourhood of `pos`.
    pub fn adjacent_positions(&self, pos: Position) -> Result<Positions, BoardError> {
        self.tile(pos)?;
        Ok(pos.neighbours().filter(|p| p.is_on_board()).collect())
    }

    /// Squares a worker standing on `pos` may step to.
    ///
    /// A neighbour qualifies when it is empty, not a dome, and at most one
    /// level above `pos`. With `restrict_upward` set, stepping up at all is
    /// forbidden.
    pub fn valid_moves(
        &self,
        pos: Position,
        restrict_upward: bool,
    ) -> Result<Positions, BoardError> {
        let from = self.tile(pos)?.height();
        let mut moves = Positions::new();

        for adj in self.adjacent_positions(pos)? {
            let tile = self.tile(adj)?;
            if tile.is_occupied() || tile.is_dome() {
                continue;
            }
            let diff = tile.height() - from;
            if diff <= 1 && !(restrict_upward && diff == 1) {
                moves.push(adj);
            }
        }

        Ok(moves)
    }

    /// Squares a worker standing on `pos` may build on.
    pub fn valid_builds(&self, pos: Position) -> Result<Positions, BoardError> {
        let mut builds = Positions::new();
        for adj in self.adjacent_positions(pos)? {
            let tile = self.tile(adj)?;
            if !tile.is_occupied() && !tile.is_dome() {
                builds.push(adj);
            }
        }
        Ok(builds)
    }

    /// [`valid_builds`](Self::valid_builds) plus `pos` itself when a worker
    /// stands there below level 3.
    pub fn valid_builds_including_self(&self, pos: Position) -> Result<Positions, BoardError> {
        let mut builds = self.valid_builds(pos)?;
        let tile = self.tile(pos)?;
        if tile.is_occupied() && !tile.is_dome() && tile.height() < Level::Level3.value() {
            builds.push(pos);
        }
        Ok(builds)
    }

    /// Put `worker` on `pos`, lifting it off its current square.
    ///
    /// Fails when `pos` is off the board, occupied, or a dome. On success the
    /// worker's previous position is remembered.
    pub fn place_worker(&mut self, worker: &mut Worker, pos: Position) -> bool {
        match self.tile(pos) {
            Ok(tile) if !tile.is_occupied() && !tile.is_dome() => {}
            _ => return false,
        }

        if let Some(old) = worker.position() {
            if let Ok(tile) = self.tile_mut(old) {
                tile.set_occupant(None);
            }
        }
        if let Ok(tile) = self.tile_mut(pos) {
            tile.set_occupant(Some(worker.id()));
        }
        if self.worker_name(worker.id()).is_none() {
            self.names.push((worker.id(), worker.name().to_string()));
        }
        worker.relocate(pos);

        trace!(worker = %worker.id(), %pos, "worker placed");
        true
    }

    /// Raise the empty tile at `pos` by one level.
    ///
    /// `Ok(false)` when the tile is occupied or already domed.
    pub fn build(&mut self, pos: Position) -> Result<bool, BoardError> {
        Ok(self.tile_mut(pos)?.build())
    }

    /// Raise the tile at `pos` without displacing whoever stands on it.
    ///
    /// `Ok(false)` when the tile is at level 3 or above.
    pub fn build_beneath(&mut self, pos: Position) -> Result<bool, BoardError> {
        Ok(self.tile_mut(pos)?.build_beneath())
    }

    /// Name of a worker that has been placed on this board.
    #[must_use]
    pub fn worker_name(&self, id: WorkerId) -> Option<&str> {
        self.names
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, name)| name.as_str())
    }

    /// Iterate `(position, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> {
        Position::all().zip(self.tiles.iter().flatten())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.tiles {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| match tile.occupant() {
                    Some(id) if !tile.is_dome() => match self.worker_name(id) {
                        Some(name) => format!("{name}{}", tile.height()),
                        None => tile.to_string(),
                    },
                    _ => tile.to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn worker(seat: PlayerId, slot: u8) -> Worker {
        Worker::new(WorkerId::new(seat, slot), format!("W{slot}"))
    }

    #[test]
    fn test_tile_out_of_bounds() {
        let board = Board::new();
        assert_eq!(
            board.tile(Position::new(5, 0)),
            Err(BoardError::OutOfBounds(Position::new(5, 0)))
        );
        assert!(board.valid_moves(Position::new(-1, 2), false).is_err());
    }

    #[test]
    fn test_adjacent_corner_and_centre() {
        let board = Board::new();
        assert_eq!(board.adjacent_positions(Position::new(0, 0)).unwrap().len(), 3);
        assert_eq!(board.adjacent_positions(Position::new(0, 2)).unwrap().len(), 5);
        assert_eq!(board.adjacent_positions(Position::new(2, 2)).unwrap().len(), 8);
    }

    #[test]
    fn test_valid_moves_height_rules() {
        let mut levels = [[Level::Ground; BOARD_SIZE]; BOARD_SIZE];
        levels[1][1] = Level::Level1;
        levels[1][2] = Level::Level2;
        levels[1][3] = Level::Dome;
        let board = Board::with_levels(levels);

        let moves = board.valid_moves(Position::new(2, 2), false).unwrap();
        assert!(moves.contains(&Position::new(1, 1)));
        assert!(!moves.contains(&Position::new(1, 2)));
        assert!(!moves.contains(&Position::new(1, 3)));
        assert_eq!(moves.len(), 6);

        let restricted = board.valid_moves(Position::new(2, 2), true).unwrap();
        assert!(!restricted.contains(&Position::new(1, 1)));
        assert_eq!(restricted.len(), 5);
    }

    #[test]
    fn test_moving_down_any_distance() {
        let mut levels = [[Level::Ground; BOARD_SIZE]; BOARD_SIZE];
        levels[2][2] = Level::Level3;
        let board = Board::with_levels(levels);
        assert_eq!(board.valid_moves(Position::new(2, 2), false).unwrap().len(), 8);
    }

    #[test]
    fn test_place_worker() {
        let mut board = Board::new();
        let mut w = worker(PlayerId::FIRST, 0);

        assert!(board.place_worker(&mut w, Position::new(0, 0)));
        assert_eq!(w.position(), Some(Position::new(0, 0)));
        assert_eq!(w.previous_position(), None);

        assert!(board.place_worker(&mut w, Position::new(0, 1)));
        assert_eq!(w.previous_position(), Some(Position::new(0, 0)));
        assert_eq!(board.occupant(Position::new(0, 0)).unwrap(), None);
        assert_eq!(board.occupant(Position::new(0, 1)).unwrap(), Some(w.id()));
    }

    #[test]
    fn test_place_worker_rejections() {
        let mut levels = [[Level::Ground; BOARD_SIZE]; BOARD_SIZE];
        levels[4][4] = Level::Dome;
        let mut board = Board::with_levels(levels);
        let mut a = worker(PlayerId::FIRST, 0);
        let mut b = worker(PlayerId::SECOND, 0);

        assert!(board.place_worker(&mut a, Position::new(2, 2)));
        assert!(!board.place_worker(&mut b, Position::new(2, 2)));
        assert!(!board.place_worker(&mut b, Position::new(4, 4)));
        assert!(!board.place_worker(&mut b, Position::new(9, 9)));
        assert_eq!(b.position(), None);
    }

    #[test]
    fn test_builds_including_self() {
        let mut board = Board::new();
        let mut w = worker(PlayerId::FIRST, 0);
        board.place_worker(&mut w, Position::new(0, 0));

        let builds = board.valid_builds_including_self(Position::new(0, 0)).unwrap();
        assert_eq!(builds.len(), 4);
        assert!(builds.contains(&Position::new(0, 0)));

        // Nobody on (4, 4): the centre square is not added.
        let builds = board.valid_builds_including_self(Position::new(4, 4)).unwrap();
        assert_eq!(builds.len(), 3);
    }

    #[test]
    fn test_build_to_dome() {
        let mut board = Board::new();
        let pos = Position::new(3, 3);
        for _ in 0..4 {
            assert!(board.build(pos).unwrap());
        }
        assert!(board.tile(pos).unwrap().is_dome());
        assert!(!board.build(pos).unwrap());
        assert_eq!(board.tile(pos).unwrap().level(), Level::Dome);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.build(Position::new(0, 0)).unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), BOARD_SIZE);
        assert!(text.starts_with("1 0 0 0 0"));
    }

    #[test]
    fn test_display_uses_worker_names() {
        let mut board = Board::new();
        let mut zed = Worker::new(WorkerId::new(PlayerId::FIRST, 1), "Z2");
        assert!(board.place_worker(&mut zed, Position::new(0, 0)));
        assert!(board.place_worker(&mut zed, Position::new(0, 1)));

        assert_eq!(board.worker_name(zed.id()), Some("Z2"));
        assert_eq!(board.names.len(), 1);
        assert!(board.to_string().starts_with("0 Z20 0 0 0"));
    }
}
