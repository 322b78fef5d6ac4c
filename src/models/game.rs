//! Match, match sides, knockout round labels, and scores.

use crate::models::couple::CoupleId;
use crate::models::zone::ZoneId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of the match won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn other(self) -> Self {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

/// One side of a match. A side starts out as a couple, a bye filler, or a
/// slot awaiting the winner of an earlier match, and is resolved to a
/// couple before the match can be played.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Side {
    /// A concrete couple.
    Couple(CoupleId),
    /// Bracket filler: the opponent advances without playing.
    Bye,
    /// Resolved once the referenced match completes.
    AwaitingWinner(MatchId),
}

impl Side {
    /// The couple on this side, if already resolved.
    pub fn couple(&self) -> Option<CoupleId> {
        match self {
            Side::Couple(id) => Some(*id),
            Side::Bye | Side::AwaitingWinner(_) => None,
        }
    }
}

/// Knockout round labels, ordered from the widest round to the final.
/// Named after the count of matches in the round, as printed on draw
/// sheets (16 couples play the eighth-finals, etc.).
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutRound {
    ThirtySeconds,
    Sixteenths,
    Eighths,
    Quarterfinals,
    Semifinal,
    Final,
}

impl KnockoutRound {
    /// Round label for a bracket with the given number of couples.
    /// Covers bracket sizes 2 through 64; anything else has no label.
    pub fn for_couples(couples: usize) -> Option<Self> {
        match couples {
            2 => Some(KnockoutRound::Final),
            4 => Some(KnockoutRound::Semifinal),
            8 => Some(KnockoutRound::Quarterfinals),
            16 => Some(KnockoutRound::Eighths),
            32 => Some(KnockoutRound::Sixteenths),
            64 => Some(KnockoutRound::ThirtySeconds),
            _ => None,
        }
    }

    /// Number of couples entering this round.
    pub fn couples(self) -> usize {
        match self {
            KnockoutRound::Final => 2,
            KnockoutRound::Semifinal => 4,
            KnockoutRound::Quarterfinals => 8,
            KnockoutRound::Eighths => 16,
            KnockoutRound::Sixteenths => 32,
            KnockoutRound::ThirtySeconds => 64,
        }
    }

    /// The round that follows this one, or None after the final.
    pub fn next(self) -> Option<Self> {
        match self {
            KnockoutRound::ThirtySeconds => Some(KnockoutRound::Sixteenths),
            KnockoutRound::Sixteenths => Some(KnockoutRound::Eighths),
            KnockoutRound::Eighths => Some(KnockoutRound::Quarterfinals),
            KnockoutRound::Quarterfinals => Some(KnockoutRound::Semifinal),
            KnockoutRound::Semifinal => Some(KnockoutRound::Final),
            KnockoutRound::Final => None,
        }
    }
}

/// Stage a match belongs to: zone round-robin or a knockout round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "round")]
pub enum Round {
    Zone,
    Knockout(KnockoutRound),
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// Games won per side in one set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u8,
    pub b: u8,
}

impl SetScore {
    pub fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    /// Winner of this set; None when tied (an invalid set).
    pub fn winner(&self) -> Option<TeamSide> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(TeamSide::A),
            std::cmp::Ordering::Less => Some(TeamSide::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Full recorded score of a match, one entry per set. A single-set score
/// is used for the round-robin "American" game-count format.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub sets: Vec<SetScore>,
}

impl MatchScore {
    pub fn new(sets: Vec<SetScore>) -> Self {
        Self { sets }
    }

    /// Sets won by each side, (a, b).
    pub fn sets_won(&self) -> (u8, u8) {
        let mut won = (0, 0);
        for set in &self.sets {
            match set.winner() {
                Some(TeamSide::A) => won.0 += 1,
                Some(TeamSide::B) => won.1 += 1,
                None => {}
            }
        }
        won
    }

    /// Total games won by each side across all sets, (a, b).
    pub fn games_won(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(a, b), set| {
            (a + u32::from(set.a), b + u32::from(set.b))
        })
    }
}

/// A single match: two sides, a stage tag, and (once recorded) a result.
/// Created by the zone builder, the bracket seeder, or round advancement;
/// mutated only when its result is recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Set for zone matches, None for knockout matches.
    pub zone_id: Option<ZoneId>,
    pub round: Round,
    pub side_a: Side,
    pub side_b: Side,
    pub status: MatchStatus,
    /// None until a result is recorded (bye matches never get one).
    pub result: Option<MatchScore>,
    pub winner: Option<TeamSide>,
    /// Position within the round; adjacent pairs feed the next round.
    pub order: u32,
}

impl Match {
    /// A pending zone round-robin match between two couples.
    pub fn zone(zone_id: ZoneId, couple_a: CoupleId, couple_b: CoupleId, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            zone_id: Some(zone_id),
            round: Round::Zone,
            side_a: Side::Couple(couple_a),
            side_b: Side::Couple(couple_b),
            status: MatchStatus::Pending,
            result: None,
            winner: None,
            order,
        }
    }

    /// A pending knockout match with the given sides.
    pub fn knockout(round: KnockoutRound, side_a: Side, side_b: Side, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            zone_id: None,
            round: Round::Knockout(round),
            side_a,
            side_b,
            status: MatchStatus::Pending,
            result: None,
            winner: None,
            order,
        }
    }

    pub fn side(&self, side: TeamSide) -> &Side {
        match side {
            TeamSide::A => &self.side_a,
            TeamSide::B => &self.side_b,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// The couple that won, once the match is completed and the winning
    /// side is resolved.
    pub fn winner_couple(&self) -> Option<CoupleId> {
        self.winner.and_then(|w| self.side(w).couple())
    }

    /// Whether the given couple plays on either side.
    pub fn involves(&self, couple_id: CoupleId) -> bool {
        self.side_a.couple() == Some(couple_id) || self.side_b.couple() == Some(couple_id)
    }
}
