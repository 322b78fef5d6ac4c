//! Padel tournament platform: library with models and progression logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_if_ready, build_zones, pair_individuals, record_result, register_couple,
    register_individual, start_tournament, unregister, winner_of, zone_standings, StandingRow,
};
pub use models::{
    Category, Couple, CoupleId, Entrant, ErrorKind, Inscription, KnockoutRound, Match, MatchId,
    MatchScore, MatchStatus, Player, PlayerId, Round, Roster, ScoringFormat, SetScore, Side,
    TeamSide, Tournament, TournamentConfig, TournamentError, TournamentFormat, TournamentId,
    TournamentStatus, Zone, ZoneId,
};
