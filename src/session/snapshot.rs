//! Read-only views for the rendering surface.
//!
//! A [`Snapshot`] is everything a UI needs to redraw: it owns its data, so
//! it can be shipped across threads or serialized without touching the
//! engine again.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::board::Level;
use crate::cards::GodCard;
use crate::clock::TimeWarning;
use crate::core::{PlayerId, Position, BOARD_SIZE};
use crate::pieces::{Color, WorkerId};
use crate::rules::{Engine, GameOutcome, Phase};

/// One square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub position: Position,
    pub level: Level,
    pub occupant: Option<WorkerId>,
}

/// One seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    /// Shade used for the player's workers.
    pub worker_color: Color,
    pub god_card: GodCard,
    pub hints_remaining: u8,
    pub clock_remaining: Duration,
    /// `MM:SS`.
    pub clock_display: String,
    pub clock_warning: TimeWarning,
}

/// Full picture of a session at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Row-major, 25 entries.
    pub tiles: Vec<TileView>,
    pub phase: Phase,
    pub current_player: PlayerId,
    pub players: Vec<PlayerView>,
    /// Squares a click is currently accepted on.
    pub highlighted: Vec<Position>,
    /// Where the selected worker stands.
    pub selected: Option<Position>,
    pub god_power_active: bool,
    pub turn: u32,
    pub outcome: Option<GameOutcome>,
}

impl Snapshot {
    pub fn capture(engine: &Engine) -> Self {
        let tiles = engine
            .board()
            .iter()
            .map(|(position, tile)| TileView {
                position,
                level: tile.level(),
                occupant: tile.occupant(),
            })
            .collect();

        let clock = engine.clock();
        let players = engine
            .players()
            .iter()
            .map(|(id, p)| PlayerView {
                id,
                name: p.name().to_string(),
                color: p.color(),
                worker_color: p.dark_color(),
                god_card: p.god_card(),
                hints_remaining: p.hints_remaining(),
                clock_remaining: clock.remaining(id),
                clock_display: clock.display(id),
                clock_warning: clock.warning(id),
            })
            .collect();

        Self {
            tiles,
            phase: engine.phase(),
            current_player: engine.current_player_id(),
            players,
            highlighted: engine.legal_targets(),
            selected: engine.selected_worker().and_then(|w| w.position()),
            god_power_active: engine.god_power_active(),
            turn: engine.turn_count(),
            outcome: engine.outcome(),
        }
    }

    /// The view of one square.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&TileView> {
        let (row, col) = pos.indices()?;
        self.tiles.get(row * BOARD_SIZE + col)
    }
}
