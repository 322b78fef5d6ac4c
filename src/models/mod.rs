//! Data structures for the padel platform: players, couples, zones, matches,
//! tournaments.

mod couple;
mod game;
mod player;
mod roster;
mod tournament;
mod zone;

pub use couple::{Couple, CoupleId};
pub use game::{
    KnockoutRound, Match, MatchId, MatchScore, MatchStatus, Round, SetScore, Side, TeamSide,
};
pub use player::{Category, Player, PlayerId};
pub use roster::Roster;
pub use tournament::{
    Entrant, ErrorKind, Inscription, ScoringFormat, Tournament, TournamentConfig, TournamentError,
    TournamentFormat, TournamentId, TournamentStatus,
};
pub use zone::{Zone, ZoneId};
