//! Integration tests for the standings calculator, including the
//! hand-computed table for a fully played zone of four.

use padel_tournament_web::{
    record_result, zone_standings, Category, CoupleId, Match, MatchId, MatchScore, Player, Roster,
    SetScore, Tournament, TournamentStatus, Zone,
};

fn make_couples(roster: &mut Roster, n: usize) -> Vec<CoupleId> {
    (0..n)
        .map(|i| {
            let a = roster.add_player(Player::new(format!("C{i}a")));
            let b = roster.add_player(Player::new(format!("C{i}b")));
            roster.find_or_create_couple(a, b)
        })
        .collect()
}

/// Tournament with one hand-assembled zone, already in progress.
fn zone_of(couples: &[CoupleId]) -> Tournament {
    let mut t = Tournament::new("Open", Category::new("7ma", 100), 32);
    let zone = Zone::new("Zone A", couples.to_vec());
    let mut order = 0;
    for a in 0..couples.len() {
        for b in (a + 1)..couples.len() {
            t.matches
                .push(Match::zone(zone.id, couples[a], couples[b], order));
            order += 1;
        }
    }
    t.zones.push(zone);
    t.status = TournamentStatus::InProgress;
    t
}

fn match_between(t: &Tournament, x: CoupleId, y: CoupleId) -> MatchId {
    t.matches
        .iter()
        .find(|m| m.involves(x) && m.involves(y))
        .map(|m| m.id)
        .expect("no match between the couples")
}

/// Record a result given per-set games for the couple listed first.
fn record(t: &mut Tournament, x: CoupleId, y: CoupleId, sets: &[(u8, u8)]) {
    let id = match_between(t, x, y);
    let m = t.find_match(id).unwrap();
    // Flip the games when the requested "first" couple sits on side B.
    let flip = m.side_a.couple() != Some(x);
    let score = MatchScore::new(
        sets.iter()
            .map(|&(a, b)| if flip { SetScore::new(b, a) } else { SetScore::new(a, b) })
            .collect(),
    );
    record_result(t, id, score).unwrap();
}

#[test]
fn fully_played_zone_matches_the_hand_computed_table() {
    let mut roster = Roster::new();
    let c = make_couples(&mut roster, 4);
    let (a, b, cc, d) = (c[0], c[1], c[2], c[3]);
    let mut t = zone_of(&c);

    // A beats everyone, B beats C and D, C beats D.
    record(&mut t, a, b, &[(6, 3), (6, 2)]);
    record(&mut t, a, cc, &[(6, 1), (6, 4)]);
    record(&mut t, a, d, &[(6, 0), (6, 0)]);
    record(&mut t, b, cc, &[(6, 4), (7, 5)]);
    record(&mut t, b, d, &[(6, 2), (6, 2)]);
    record(&mut t, cc, d, &[(7, 6), (6, 4)]);

    let rows = zone_standings(&t, t.zones[0].id).unwrap();
    let order: Vec<CoupleId> = rows.iter().map(|r| r.couple).collect();
    assert_eq!(order, vec![a, b, cc, d]);

    assert_eq!(rows[0].played, 3);
    assert_eq!(rows[0].won, 3);
    assert_eq!(rows[0].lost, 0);
    assert_eq!(rows[0].points, 6);
    // A: +3 +4 +7 +2 +6 +6 = won 36 games, conceded 10.
    assert_eq!(rows[0].games_diff, 26);

    assert_eq!(rows[3].played, 3);
    assert_eq!(rows[3].won, 0);
    assert_eq!(rows[3].points, 0);
}

#[test]
fn two_way_points_tie_is_broken_by_head_to_head() {
    let mut roster = Roster::new();
    let c = make_couples(&mut roster, 4);
    let (a, b, cc, d) = (c[0], c[1], c[2], c[3]);
    let mut t = zone_of(&c);

    // A and B both end on two wins. B has the far better games
    // difference, but A won the direct confrontation.
    record(&mut t, a, b, &[(6, 4), (6, 4)]);
    record(&mut t, a, cc, &[(6, 4), (6, 4)]);
    record(&mut t, d, a, &[(6, 0), (6, 0)]);
    record(&mut t, b, cc, &[(6, 0), (6, 0)]);
    record(&mut t, b, d, &[(6, 0), (6, 0)]);
    record(&mut t, cc, d, &[(6, 3), (6, 3)]);

    let rows = zone_standings(&t, t.zones[0].id).unwrap();
    let order: Vec<CoupleId> = rows.iter().map(|r| r.couple).collect();
    assert_eq!(order[0], a, "head-to-head winner must rank first");
    assert_eq!(order[1], b);
}

#[test]
fn three_way_points_tie_falls_back_to_games_difference() {
    let mut roster = Roster::new();
    let c = make_couples(&mut roster, 4);
    let (a, b, cc, d) = (c[0], c[1], c[2], c[3]);
    let mut t = zone_of(&c);

    // A beats B, B beats C, C beats A; D loses everything. Three couples
    // tie on points, so head-to-head does not apply and games decide.
    record(&mut t, a, b, &[(6, 0), (6, 0)]);
    record(&mut t, b, cc, &[(6, 3), (6, 3)]);
    record(&mut t, cc, a, &[(7, 6), (7, 6)]);
    record(&mut t, a, d, &[(6, 1), (6, 1)]);
    record(&mut t, b, d, &[(6, 1), (6, 1)]);
    record(&mut t, cc, d, &[(6, 1), (6, 1)]);

    let rows = zone_standings(&t, t.zones[0].id).unwrap();
    let order: Vec<CoupleId> = rows.iter().map(|r| r.couple).collect();
    // Diffs: A +20, C +6, B +4, D -30.
    assert_eq!(order, vec![a, cc, b, d]);
}

#[test]
fn standings_are_deterministic_and_total() {
    let mut roster = Roster::new();
    let c = make_couples(&mut roster, 4);
    let mut t = zone_of(&c);

    record(&mut t, c[0], c[1], &[(6, 2), (6, 2)]);
    record(&mut t, c[2], c[3], &[(6, 2), (6, 2)]);

    let first = zone_standings(&t, t.zones[0].id).unwrap();
    let second = zone_standings(&t, t.zones[0].id).unwrap();
    assert_eq!(first, second);

    // Untouched couples compare by zone member order, never equal.
    let order: Vec<CoupleId> = first.iter().map(|r| r.couple).collect();
    assert_eq!(order, vec![c[0], c[2], c[1], c[3]]);
}
