//! Tournament, its lifecycle, registrations, configuration, and errors.

use crate::models::couple::CoupleId;
use crate::models::game::{KnockoutRound, Match, MatchId, Round};
use crate::models::player::{Category, PlayerId};
use crate::models::zone::{Zone, ZoneId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Broad class of a tournament error, used to pick an HTTP status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input; the caller should fix the request.
    Validation,
    /// The operation clashes with current state (usually a stale client view).
    Conflict,
    /// Referenced entity does not exist.
    NotFound,
    /// A bug in the engine itself; continuing would corrupt the bracket.
    Invariant,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Player already has a registration (individual or couple) in this tournament.
    #[error("player {0} is already registered in this tournament")]
    AlreadyRegistered(PlayerId),
    /// The tournament's participant capacity is reached.
    #[error("tournament capacity of {max_players} players reached")]
    CapacityExceeded { max_players: usize },
    /// A couple needs two distinct players.
    #[error("a couple requires two distinct players")]
    SamePlayer,
    /// Player has no registration in this tournament.
    #[error("player {0} is not registered in this tournament")]
    NotRegistered(PlayerId),
    /// Registration is frozen once the tournament leaves NotStarted.
    #[error("tournament has already started")]
    TournamentAlreadyStarted,
    /// Zones were already built for this tournament.
    #[error("zones have already been built")]
    AlreadyPaired,
    /// Individual registrations left unpaired when starting.
    #[error("{0} individual registration(s) must be paired into couples before starting")]
    UnpairedPlayers(usize),
    /// Too few couples to run any bracket.
    #[error("at least {required} couples are required, found {found}")]
    NotEnoughCouples { required: usize, found: usize },
    /// The match already has a recorded result.
    #[error("match result has already been recorded")]
    MatchAlreadyCompleted,
    /// A side of the match is still a bye or awaiting a feeder's winner.
    #[error("match sides are not resolved yet")]
    MatchNotReady,
    /// The score does not satisfy the stage's win condition.
    #[error("score does not decide a winner under the {0} format")]
    InvalidScore(&'static str),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("match {0} not found")]
    MatchNotFound(MatchId),
    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),
    /// The tournament is not in a state that allows this action.
    #[error("invalid tournament state for this action")]
    InvalidState,
    /// Engine bug: the bracket reached a shape that must never occur.
    #[error("bracket invariant violated: {0}")]
    InvariantViolation(String),
}

impl TournamentError {
    /// Classify the error for callers (e.g. the HTTP layer).
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            CapacityExceeded { .. } | SamePlayer | UnpairedPlayers(_)
            | NotEnoughCouples { .. } | InvalidScore(_) | MatchNotReady => ErrorKind::Validation,
            AlreadyRegistered(_) | NotRegistered(_) | TournamentAlreadyStarted | AlreadyPaired
            | MatchAlreadyCompleted | InvalidState => ErrorKind::Conflict,
            PlayerNotFound(_) | MatchNotFound(_) | ZoneNotFound(_) => ErrorKind::NotFound,
            InvariantViolation(_) => ErrorKind::Invariant,
        }
    }
}

/// Lifecycle of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Registration open; no matches exist.
    #[default]
    NotStarted,
    /// Transient: registrations frozen, zones being built.
    Pairing,
    /// Zone and/or knockout matches being played.
    InProgress,
    /// Final resolved; champion recorded.
    Finished,
}

/// Competition format. Only one today; kept as an enum so the wire shape
/// doesn't change when more formats arrive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    RoundRobinToElimination,
}

/// Win condition a recorded score must satisfy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormat {
    /// Standard padel: first side to two sets, at most three sets.
    #[default]
    BestOfThreeSets,
    /// "American" round-robin format: one set, games decide.
    SingleSet,
}

impl ScoringFormat {
    pub fn label(self) -> &'static str {
        match self {
            ScoringFormat::BestOfThreeSets => "best-of-three-sets",
            ScoringFormat::SingleSet => "single-set",
        }
    }
}

/// Tunable parameters of the progression engine. All have serde defaults
/// so API callers can override any subset per tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Target couples per zone (zones end up within 1 of each other).
    pub ideal_zone_size: usize,
    /// Below this couple count the zone stage is skipped entirely and
    /// registration order seeds the bracket.
    pub min_couples_for_zones: usize,
    /// Couples advancing from each zone into the bracket.
    pub advance_per_zone: usize,
    /// Standings points for a zone match win (loss scores 0).
    pub points_per_win: u32,
    pub zone_scoring: ScoringFormat,
    pub knockout_scoring: ScoringFormat,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            ideal_zone_size: 4,
            min_couples_for_zones: 6,
            advance_per_zone: 2,
            points_per_win: 2,
            zone_scoring: ScoringFormat::BestOfThreeSets,
            knockout_scoring: ScoringFormat::BestOfThreeSets,
        }
    }
}

/// What a registration points at: a lone player or a formed couple.
/// The enum makes "exactly one of the two" true by construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Entrant {
    Individual(PlayerId),
    Couple(CoupleId),
}

/// One registration row linking a tournament to an entrant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Inscription {
    pub id: Uuid,
    pub entrant: Entrant,
    pub registered_at: DateTime<Utc>,
}

impl Inscription {
    pub fn individual(player_id: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            entrant: Entrant::Individual(player_id),
            registered_at: Utc::now(),
        }
    }

    pub fn couple(couple_id: CoupleId) -> Self {
        Self {
            id: Uuid::new_v4(),
            entrant: Entrant::Couple(couple_id),
            registered_at: Utc::now(),
        }
    }
}

/// Full tournament state: registrations, zones, matches, and progression.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub category: Category,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    /// Capacity in players (a couple counts as two).
    pub max_players: usize,
    pub config: TournamentConfig,
    pub created_at: DateTime<Utc>,
    pub inscriptions: Vec<Inscription>,
    pub zones: Vec<Zone>,
    pub matches: Vec<Match>,
    /// Knockout round currently being played; None before the bracket
    /// is seeded. Updated only by round advancement.
    pub current_round: Option<KnockoutRound>,
    /// Winning couple of the final, set when the tournament finishes.
    pub champion: Option<CoupleId>,
}

impl Tournament {
    /// Create a tournament accepting registrations.
    pub fn new(name: impl Into<String>, category: Category, max_players: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            format: TournamentFormat::RoundRobinToElimination,
            status: TournamentStatus::NotStarted,
            max_players,
            config: TournamentConfig::default(),
            created_at: Utc::now(),
            inscriptions: Vec::new(),
            zones: Vec::new(),
            matches: Vec::new(),
            current_round: None,
            champion: None,
        }
    }

    /// Same as [`Tournament::new`] with explicit engine parameters.
    pub fn with_config(
        name: impl Into<String>,
        category: Category,
        max_players: usize,
        config: TournamentConfig,
    ) -> Self {
        Self {
            config,
            ..Self::new(name, category, max_players)
        }
    }

    /// Couple ids in registration order (the zone builder's input).
    pub fn registered_couples(&self) -> Vec<CoupleId> {
        self.inscriptions
            .iter()
            .filter_map(|i| match i.entrant {
                Entrant::Couple(id) => Some(id),
                Entrant::Individual(_) => None,
            })
            .collect()
    }

    /// Player ids holding an individual registration.
    pub fn individual_entrants(&self) -> Vec<PlayerId> {
        self.inscriptions
            .iter()
            .filter_map(|i| match i.entrant {
                Entrant::Individual(id) => Some(id),
                Entrant::Couple(_) => None,
            })
            .collect()
    }

    /// Number of player slots taken (individual = 1, couple = 2).
    pub fn players_registered(&self) -> usize {
        self.inscriptions
            .iter()
            .map(|i| match i.entrant {
                Entrant::Individual(_) => 1,
                Entrant::Couple(_) => 2,
            })
            .sum()
    }

    pub fn zone(&self, zone_id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    pub fn find_match(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn find_match_mut(&mut self, match_id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Matches of one knockout round, in bracket order.
    pub fn round_matches(&self, round: KnockoutRound) -> Vec<&Match> {
        let mut matches: Vec<&Match> = self
            .matches
            .iter()
            .filter(|m| m.round == Round::Knockout(round))
            .collect();
        matches.sort_by_key(|m| m.order);
        matches
    }

    /// All matches of one zone.
    pub fn zone_matches(&self, zone_id: ZoneId) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| m.zone_id == Some(zone_id))
            .collect()
    }

    /// True once every zone match has a recorded result.
    pub fn zone_stage_complete(&self) -> bool {
        self.matches
            .iter()
            .filter(|m| m.round == Round::Zone)
            .all(|m| m.is_completed())
    }

    /// True if any knockout match exists (the bracket has been seeded).
    pub fn bracket_seeded(&self) -> bool {
        self.matches
            .iter()
            .any(|m| matches!(m.round, Round::Knockout(_)))
    }
}
