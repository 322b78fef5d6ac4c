//! Couple: the unordered pair of players that competes as one unit.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a couple.
pub type CoupleId = Uuid;

/// Two distinct players competing together. The pair is unordered: the
/// player ids are stored normalized (smaller id first) so that the same
/// two players always map to the same couple, regardless of call order.
/// Couples are never dissolved once matches reference them and may be
/// reused across tournaments.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Couple {
    pub id: CoupleId,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
}

impl Couple {
    /// Create a couple for two players, normalizing the pair order.
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        let (player_a, player_b) = Self::normalize(first, second);
        Self {
            id: Uuid::new_v4(),
            player_a,
            player_b,
        }
    }

    /// Canonical key for an unordered pair (smaller id first).
    pub fn normalize(first: PlayerId, second: PlayerId) -> (PlayerId, PlayerId) {
        if first <= second {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Whether the given player is one of the two members.
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.player_a == player_id || self.player_b == player_id
    }
}
