//! Advancement state machine: resolve winners into waiting slots, open the
//! next knockout round when the current one is done, crown the champion.

use crate::logic::bracket::seed_bracket_from_zones;
use crate::models::{
    CoupleId, KnockoutRound, Match, MatchId, Side, TeamSide, Tournament, TournamentError,
    TournamentStatus,
};

/// Drive the tournament forward as far as the recorded results allow.
///
/// Safe to call opportunistically after any result, any number of times:
/// every step checks for work already done before doing it, so repeated
/// calls never duplicate a round. In order, each pass
///
/// 1. seeds the bracket once the zone stage is fully completed,
/// 2. fills `AwaitingWinner` slots whose feeder match has completed,
/// 3. creates the next round when every match of the current round is
///    completed, and
/// 4. finishes the tournament when the final is decided.
pub fn advance_if_ready(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Ok(());
    }
    while advance_once(tournament)? {}
    Ok(())
}

/// One advancement pass. Returns whether anything changed.
fn advance_once(tournament: &mut Tournament) -> Result<bool, TournamentError> {
    if !tournament.bracket_seeded() {
        if !tournament.zones.is_empty() && tournament.zone_stage_complete() {
            seed_bracket_from_zones(tournament)?;
            return Ok(true);
        }
        return Ok(false);
    }

    let mut changed = resolve_awaiting_sides(tournament)?;

    let round = tournament
        .current_round
        .ok_or_else(|| invariant("bracket seeded but no current round set".into()))?;
    let round_done = tournament.round_matches(round).iter().all(|m| m.is_completed());
    if !round_done {
        return Ok(changed);
    }

    if round == KnockoutRound::Final {
        changed |= finish_tournament(tournament)?;
        return Ok(changed);
    }

    let next = round
        .next()
        .ok_or_else(|| invariant("round after the final requested".into()))?;
    if !tournament.round_matches(next).is_empty() {
        // Next round already created by an earlier call.
        if tournament.current_round != Some(next) {
            tournament.current_round = Some(next);
            return Ok(true);
        }
        return Ok(changed);
    }

    create_next_round(tournament, round, next)?;
    tournament.current_round = Some(next);
    Ok(true)
}

/// Create one next-round match per adjacent pair of current-round matches.
/// Sides start as `AwaitingWinner` and are resolved immediately when the
/// feeder is already completed (e.g. a bye).
fn create_next_round(
    tournament: &mut Tournament,
    round: KnockoutRound,
    next: KnockoutRound,
) -> Result<(), TournamentError> {
    let current: Vec<(MatchId, Option<CoupleId>)> = tournament
        .round_matches(round)
        .iter()
        .map(|m| (m.id, m.winner_couple()))
        .collect();
    if current.len() % 2 != 0 {
        return Err(invariant(format!(
            "round {round:?} has an odd number of matches ({})",
            current.len()
        )));
    }

    for (order, pair) in current.chunks(2).enumerate() {
        let side_a = feeder_side(pair[0]);
        let side_b = feeder_side(pair[1]);
        tournament
            .matches
            .push(Match::knockout(next, side_a, side_b, order as u32));
    }
    Ok(())
}

/// Side fed by a finished or pending match.
fn feeder_side((feeder_id, winner): (MatchId, Option<CoupleId>)) -> Side {
    match winner {
        Some(couple) => Side::Couple(couple),
        None => Side::AwaitingWinner(feeder_id),
    }
}

/// Replace `AwaitingWinner` sides whose feeder match has completed with
/// the actual winning couple. Returns whether any side was resolved.
fn resolve_awaiting_sides(tournament: &mut Tournament) -> Result<bool, TournamentError> {
    let mut updates: Vec<(MatchId, TeamSide, CoupleId)> = Vec::new();
    for m in &tournament.matches {
        for (slot, side) in [(TeamSide::A, m.side_a), (TeamSide::B, m.side_b)] {
            let Side::AwaitingWinner(feeder_id) = side else {
                continue;
            };
            let feeder = tournament
                .find_match(feeder_id)
                .ok_or_else(|| invariant(format!("feeder match {feeder_id} is missing")))?;
            if feeder.is_completed() {
                let couple = feeder.winner_couple().ok_or_else(|| {
                    invariant(format!("completed match {feeder_id} has no winning couple"))
                })?;
                updates.push((m.id, slot, couple));
            }
        }
    }

    let changed = !updates.is_empty();
    for (match_id, slot, couple) in updates {
        if let Some(m) = tournament.find_match_mut(match_id) {
            match slot {
                TeamSide::A => m.side_a = Side::Couple(couple),
                TeamSide::B => m.side_b = Side::Couple(couple),
            }
        }
    }
    Ok(changed)
}

/// The final is completed: record the champion and close the tournament.
fn finish_tournament(tournament: &mut Tournament) -> Result<bool, TournamentError> {
    if tournament.status == TournamentStatus::Finished {
        return Ok(false);
    }
    let final_match = tournament
        .round_matches(KnockoutRound::Final)
        .into_iter()
        .next()
        .ok_or_else(|| invariant("final round has no match".into()))?;
    let champion = final_match
        .winner_couple()
        .ok_or_else(|| invariant("completed final has no winning couple".into()))?;
    tournament.champion = Some(champion);
    tournament.status = TournamentStatus::Finished;
    Ok(true)
}

/// Invariant breaches mean an engine bug; log loudly before reporting.
fn invariant(message: String) -> TournamentError {
    log::error!("bracket invariant violated: {message}");
    TournamentError::InvariantViolation(message)
}
