//! Handing out god cards at the start of a session.

use serde::{Deserialize, Serialize};

use super::god::GodCard;
use crate::core::{GameRng, PlayerMap};

/// Card assignment policy for a new session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardDeal {
    /// Use exactly these cards, first seat then second.
    Fixed(GodCard, GodCard),
    /// One seat gets no power, the other a random special card; which seat
    /// gets which is also random.
    #[default]
    Random,
}

impl CardDeal {
    /// Resolve the policy into one card per seat.
    pub fn deal(self, rng: &mut GameRng) -> PlayerMap<GodCard> {
        match self {
            CardDeal::Fixed(first, second) => PlayerMap::from_pair(first, second),
            CardDeal::Random => {
                let special = rng
                    .choose(&GodCard::SPECIAL)
                    .copied()
                    .unwrap_or(GodCard::None);
                if rng.coin_flip() {
                    PlayerMap::from_pair(special, GodCard::None)
                } else {
                    PlayerMap::from_pair(GodCard::None, special)
                }
            }
        }
    }
}
