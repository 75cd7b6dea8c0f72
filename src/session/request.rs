//! What a "new game" request carries.

use serde::{Deserialize, Serialize};

use crate::cards::CardDeal;
use crate::core::{PlayerId, PlayerMap, SessionConfig};
use crate::pieces::{Color, CYAN, MAGENTA};
use crate::rules::{Engine, PlayerSpec};

/// Parameters for a fresh session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub players: PlayerMap<PlayerSpec>,
    pub cards: CardDeal,
    pub config: SessionConfig,
}

impl Default for SessionRequest {
    fn default() -> Self {
        Self::new("Player 1", CYAN, "Player 2", MAGENTA)
    }
}

impl SessionRequest {
    pub fn new(
        first_name: impl Into<String>,
        first_color: Color,
        second_name: impl Into<String>,
        second_color: Color,
    ) -> Self {
        Self {
            players: PlayerMap::from_pair(
                PlayerSpec {
                    name: first_name.into(),
                    color: first_color,
                },
                PlayerSpec {
                    name: second_name.into(),
                    color: second_color,
                },
            ),
            cards: CardDeal::Random,
            config: SessionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: CardDeal) -> Self {
        self.cards = cards;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// An engine in `setup`, ready to start.
    pub(crate) fn build_engine(&self) -> Engine {
        PlayerId::all()
            .fold(Engine::builder(), |builder, seat| {
                let spec = &self.players[seat];
                builder.player(seat, spec.name.clone(), spec.color)
            })
            .cards(self.cards)
            .config(self.config.clone())
            .build()
    }
}
