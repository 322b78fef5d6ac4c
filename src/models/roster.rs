//! Roster: club-wide players and couples, shared across tournaments.

use crate::models::couple::{Couple, CoupleId};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Players and couples known to the club. Couples are deduplicated: the
/// same unordered pair always resolves to the same couple id, so a couple
/// can be reused across tournaments.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    pub players: HashMap<PlayerId, Player>,
    pub couples: HashMap<CoupleId, Couple>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player and return their id.
    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.insert(id, player);
        id
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn couple(&self, id: CoupleId) -> Option<&Couple> {
        self.couples.get(&id)
    }

    /// Find the couple for an unordered pair of players, if it exists.
    pub fn find_couple(&self, a: PlayerId, b: PlayerId) -> Option<CoupleId> {
        let key = Couple::normalize(a, b);
        self.couples
            .values()
            .find(|c| (c.player_a, c.player_b) == key)
            .map(|c| c.id)
    }

    /// Look up the couple for a pair, creating it if the two players have
    /// never been paired before.
    pub fn find_or_create_couple(&mut self, a: PlayerId, b: PlayerId) -> CoupleId {
        if let Some(id) = self.find_couple(a, b) {
            return id;
        }
        let couple = Couple::new(a, b);
        let id = couple.id;
        self.couples.insert(id, couple);
        id
    }

    /// Display name for a couple: both player names joined.
    pub fn couple_name(&self, id: CoupleId) -> Option<String> {
        let couple = self.couples.get(&id)?;
        let a = self.players.get(&couple.player_a)?;
        let b = self.players.get(&couple.player_b)?;
        Some(format!("{} / {}", a.name, b.name))
    }
}
