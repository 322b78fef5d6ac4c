//! Match result recorder: the single place a match becomes completed.

use crate::logic::advancement::advance_if_ready;
use crate::models::{
    MatchId, MatchScore, MatchStatus, Round, ScoringFormat, Side, TeamSide, Tournament,
    TournamentError, TournamentStatus,
};

/// Record the score of one match, compute the winner, and trigger any
/// advancement it unlocks.
///
/// Zone matches only become input for the standings; knockout matches may
/// resolve waiting slots or open the next round. Returns the winning side.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score: MatchScore,
) -> Result<TeamSide, TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::InvalidState);
    }

    let format = {
        let m = tournament
            .find_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.is_completed() {
            return Err(TournamentError::MatchAlreadyCompleted);
        }
        if !matches!((m.side_a, m.side_b), (Side::Couple(_), Side::Couple(_))) {
            return Err(TournamentError::MatchNotReady);
        }
        match m.round {
            Round::Zone => tournament.config.zone_scoring,
            Round::Knockout(_) => tournament.config.knockout_scoring,
        }
    };

    let winner = winner_of(&score, format)?;

    let m = tournament
        .find_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    m.result = Some(score);
    m.winner = Some(winner);
    m.status = MatchStatus::Completed;

    advance_if_ready(tournament)?;
    Ok(winner)
}

/// Winner of a score under the given format, or `InvalidScore`.
///
/// Best-of-three: two or three sets, no tied set, and the winner takes
/// exactly two (play stops at the second set win). Single set: exactly
/// one set with distinct game counts.
pub fn winner_of(score: &MatchScore, format: ScoringFormat) -> Result<TeamSide, TournamentError> {
    let invalid = || TournamentError::InvalidScore(format.label());
    if score.sets.iter().any(|set| set.winner().is_none()) {
        return Err(invalid());
    }
    match format {
        ScoringFormat::SingleSet => {
            if score.sets.len() != 1 {
                return Err(invalid());
            }
            score.sets[0].winner().ok_or_else(invalid)
        }
        ScoringFormat::BestOfThreeSets => {
            if !(2..=3).contains(&score.sets.len()) {
                return Err(invalid());
            }
            match score.sets_won() {
                (2, b) if b < 2 => Ok(TeamSide::A),
                (a, 2) if a < 2 => Ok(TeamSide::B),
                _ => Err(invalid()),
            }
        }
    }
}
