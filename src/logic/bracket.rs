//! Bracket seeder: turn an ordered seed list into the first knockout round,
//! padding to a power of two with byes.

use crate::logic::standings::zone_standings;
use crate::models::{
    CoupleId, KnockoutRound, Match, MatchStatus, Side, TeamSide, Tournament, TournamentError,
};

/// Seed the bracket from the finished zone stage.
///
/// The top `advance_per_zone` couples of every zone advance; all zone
/// winners are seeded ahead of all runners-up, so two couples from the
/// same zone land in different halves of the draw where possible.
pub fn seed_bracket_from_zones(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let seeds = collect_seeds(tournament)?;
    seed_bracket(tournament, &seeds)
}

/// Seed the bracket directly from couple registrations, in registration
/// order. Used when the zone stage is skipped.
pub fn seed_bracket_direct(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let seeds = tournament.registered_couples();
    seed_bracket(tournament, &seeds)
}

/// Advancing couples across all zones: every zone's first place (in zone
/// order), then every second place, and so on.
fn collect_seeds(tournament: &Tournament) -> Result<Vec<CoupleId>, TournamentError> {
    let mut tables = Vec::with_capacity(tournament.zones.len());
    for zone in &tournament.zones {
        tables.push(zone_standings(tournament, zone.id)?);
    }

    let mut seeds = Vec::new();
    for rank in 0..tournament.config.advance_per_zone {
        for table in &tables {
            if let Some(row) = table.get(rank) {
                seeds.push(row.couple);
            }
        }
    }
    Ok(seeds)
}

/// Create the first knockout round for the given seed list.
///
/// Bracket size is the next power of two at or above the seed count; the
/// missing slots become byes awarded to the top seeds. First-round pairing
/// follows the standard position table (seed 1 meets the lowest surviving
/// seed) so the strongest seeds can only meet in the latest rounds. Bye
/// matches are created already completed, with the recipient as winner.
fn seed_bracket(tournament: &mut Tournament, seeds: &[CoupleId]) -> Result<(), TournamentError> {
    if tournament.bracket_seeded() {
        return Err(TournamentError::InvalidState);
    }
    if seeds.len() < 2 {
        return Err(TournamentError::NotEnoughCouples {
            required: 2,
            found: seeds.len(),
        });
    }

    let size = seeds.len().next_power_of_two();
    let round = KnockoutRound::for_couples(size).ok_or_else(|| {
        TournamentError::InvariantViolation(format!("no round label for a bracket of {size}"))
    })?;

    let positions = bracket_positions(size);
    for (order, slot_pair) in positions.chunks(2).enumerate() {
        let side_a = seed_side(seeds, slot_pair[0]);
        let side_b = seed_side(seeds, slot_pair[1]);
        let mut m = Match::knockout(round, side_a, side_b, order as u32);

        // A bye is decided on the spot; nobody records a result for it.
        match (side_a, side_b) {
            (Side::Couple(_), Side::Bye) => {
                m.status = MatchStatus::Completed;
                m.winner = Some(TeamSide::A);
            }
            (Side::Bye, Side::Couple(_)) => {
                m.status = MatchStatus::Completed;
                m.winner = Some(TeamSide::B);
            }
            _ => {}
        }
        tournament.matches.push(m);
    }

    tournament.current_round = Some(round);
    Ok(())
}

/// Side for a 1-based seed slot; slots beyond the seed list are byes.
fn seed_side(seeds: &[CoupleId], slot: usize) -> Side {
    match seeds.get(slot - 1) {
        Some(&couple) => Side::Couple(couple),
        None => Side::Bye,
    }
}

/// Standard single-elimination position table for a power-of-two bracket:
/// 1-based seed numbers in draw order, top seeds spread so that seeds 1
/// and 2 can only meet in the final. Consecutive pairs form the
/// first-round matches, and adjacent matches feed the same next-round slot.
fn bracket_positions(size: usize) -> Vec<usize> {
    let mut order = vec![1usize];
    while order.len() < size {
        let doubled = order.len() * 2;
        let mut next = Vec::with_capacity(doubled);
        for &seed in &order {
            next.push(seed);
            next.push(doubled + 1 - seed);
        }
        order = next;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::bracket_positions;

    #[test]
    fn positions_for_small_brackets() {
        assert_eq!(bracket_positions(2), vec![1, 2]);
        assert_eq!(bracket_positions(4), vec![1, 4, 2, 3]);
        assert_eq!(bracket_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    }

    #[test]
    fn positions_cover_every_seed_once() {
        for size in [2usize, 4, 8, 16, 32, 64] {
            let mut positions = bracket_positions(size);
            positions.sort_unstable();
            let expected: Vec<usize> = (1..=size).collect();
            assert_eq!(positions, expected);
        }
    }

    #[test]
    fn top_seeds_split_across_halves() {
        let positions = bracket_positions(16);
        let first_half = &positions[..8];
        assert!(first_half.contains(&1));
        assert!(!first_half.contains(&2));
    }
}
