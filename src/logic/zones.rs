//! Zone builder: partition registered couples into balanced round-robin
//! groups and generate their matches.

use crate::models::{Match, Tournament, TournamentError, Zone};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Smallest zone allowed when more than one zone exists.
const MIN_ZONE_SIZE: usize = 3;

/// Partition the tournament's couples into zones and create every
/// round-robin pairing as a pending match.
///
/// Runs exactly once per tournament: a second call fails with
/// `AlreadyPaired`. The couple list is shuffled with an rng seeded from
/// the tournament id, then dealt round-robin across the zones, so the
/// same registrations always produce the same assignment and zone sizes
/// differ by at most one.
pub fn build_zones(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.zones.is_empty() {
        return Err(TournamentError::AlreadyPaired);
    }

    let mut couples = tournament.registered_couples();
    if couples.len() < 2 {
        return Err(TournamentError::NotEnoughCouples {
            required: 2,
            found: couples.len(),
        });
    }

    let seed = tournament.id.as_u128() as u64;
    couples.shuffle(&mut StdRng::seed_from_u64(seed));

    let zone_count = pick_zone_count(couples.len(), tournament.config.ideal_zone_size);
    let mut members: Vec<Vec<_>> = vec![Vec::new(); zone_count];
    for (i, couple) in couples.into_iter().enumerate() {
        members[i % zone_count].push(couple);
    }

    let mut order = 0u32;
    for (i, zone_members) in members.into_iter().enumerate() {
        let zone = Zone::new(zone_label(i), zone_members);
        for a in 0..zone.members.len() {
            for b in (a + 1)..zone.members.len() {
                tournament
                    .matches
                    .push(Match::zone(zone.id, zone.members[a], zone.members[b], order));
                order += 1;
            }
        }
        tournament.zones.push(zone);
    }
    Ok(())
}

/// Number of zones for `n` couples targeting `ideal` couples per zone.
/// Shrinks the count until no zone would fall under [`MIN_ZONE_SIZE`]
/// (a single zone may still be as small as two couples).
fn pick_zone_count(n: usize, ideal: usize) -> usize {
    let ideal = ideal.max(2);
    let mut count = n.div_ceil(ideal).max(1);
    while count > 1 && n < count * MIN_ZONE_SIZE {
        count -= 1;
    }
    count
}

fn zone_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("Zone {}", (b'A' + i) as char),
        _ => format!("Zone {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::pick_zone_count;

    #[test]
    fn zone_count_targets_ideal_size() {
        assert_eq!(pick_zone_count(8, 4), 2);
        assert_eq!(pick_zone_count(12, 4), 3);
        assert_eq!(pick_zone_count(16, 4), 4);
    }

    #[test]
    fn zone_count_never_yields_undersized_zones() {
        // 9 couples at ideal 4 would be 3 zones of 3, fine.
        assert_eq!(pick_zone_count(9, 4), 3);
        // 10 -> ceil(10/4)=3 zones of 4/3/3.
        assert_eq!(pick_zone_count(10, 4), 3);
        // 5 couples can't fill two zones of three.
        assert_eq!(pick_zone_count(5, 3), 1);
        assert_eq!(pick_zone_count(7, 3), 2);
    }
}
