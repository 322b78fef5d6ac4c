//! Full tournament run: zone round-robin into the bracket and a champion.

use padel_tournament_web::{
    advance_if_ready, record_result, register_couple, start_tournament, zone_standings, Category,
    CoupleId, KnockoutRound, MatchScore, MatchStatus, Player, Round, Roster, SetScore, Tournament,
    TournamentStatus,
};

fn club_with_couples(n: usize) -> (Roster, Tournament, Vec<CoupleId>) {
    let mut roster = Roster::new();
    let mut t = Tournament::new("Apertura", Category::new("7ma", 100), 256);
    let mut couples = Vec::new();
    for i in 0..n {
        let a = roster.add_player(Player::new(format!("P{i}a")));
        let b = roster.add_player(Player::new(format!("P{i}b")));
        register_couple(&mut roster, &mut t, a, b).unwrap();
        couples.push(roster.find_couple(a, b).unwrap());
    }
    (roster, t, couples)
}

fn side_a_wins() -> MatchScore {
    MatchScore::new(vec![SetScore::new(6, 0), SetScore::new(6, 0)])
}

/// Record every pending match, one at a time, until none remain in the
/// given stage predicate.
fn sweep_pending<F: Fn(&padel_tournament_web::Match) -> bool>(t: &mut Tournament, keep: F) {
    loop {
        let next = t
            .matches
            .iter()
            .find(|m| m.status == MatchStatus::Pending && keep(m))
            .map(|m| m.id);
        match next {
            Some(id) => {
                record_result(t, id, side_a_wins()).unwrap();
            }
            None => break,
        }
    }
}

#[test]
fn zone_tournament_runs_to_a_champion() {
    let (_, mut t, _) = club_with_couples(8);
    start_tournament(&mut t).unwrap();
    assert_eq!(t.status, TournamentStatus::InProgress);
    assert_eq!(t.zones.len(), 2);
    assert!(!t.bracket_seeded());

    // Play the whole zone stage. Side A of every zone match is the
    // earlier zone member, so standings end up in member order.
    sweep_pending(&mut t, |m| m.round == Round::Zone);

    for zone in t.zones.clone() {
        let rows = zone_standings(&t, zone.id).unwrap();
        assert_eq!(rows.len(), zone.members.len());
        for row in &rows {
            assert_eq!(row.played, 3);
        }
        let order: Vec<CoupleId> = rows.iter().map(|r| r.couple).collect();
        assert_eq!(order, zone.members);
    }

    // The last zone result seeded the bracket on its own: two zones
    // advancing two couples each make a four-couple semifinal.
    assert!(t.bracket_seeded());
    assert_eq!(t.current_round, Some(KnockoutRound::Semifinal));
    let semis = t.round_matches(KnockoutRound::Semifinal);
    assert_eq!(semis.len(), 2);

    // Zone winners are kept apart, and nobody meets a zone mate in
    // round one.
    let zone_of = |c: CoupleId| t.zones.iter().position(|z| z.members.contains(&c)).unwrap();
    for m in &semis {
        let (a, b) = (m.side_a.couple().unwrap(), m.side_b.couple().unwrap());
        assert_ne!(zone_of(a), zone_of(b), "zone mates met in round one");
    }
    let winners = [t.zones[0].members[0], t.zones[1].members[0]];
    assert!(semis.iter().all(|m| {
        let (a, b) = (m.side_a.couple().unwrap(), m.side_b.couple().unwrap());
        !(winners.contains(&a) && winners.contains(&b))
    }));

    // Extra advancement calls while the bracket plays out are no-ops.
    let total = t.matches.len();
    advance_if_ready(&mut t).unwrap();
    assert_eq!(t.matches.len(), total);

    // Knock out the bracket. Side A keeps winning, so the first seed
    // (zone A's table leader) takes the title.
    sweep_pending(&mut t, |m| matches!(m.round, Round::Knockout(_)));

    assert_eq!(t.status, TournamentStatus::Finished);
    assert_eq!(t.champion, Some(t.zones[0].members[0]));
    assert_eq!(t.round_matches(KnockoutRound::Final).len(), 1);
}

#[test]
fn five_couples_skip_zones_and_play_an_eight_bracket() {
    let (_, mut t, couples) = club_with_couples(5);
    start_tournament(&mut t).unwrap();

    // Under the zone threshold: straight to a bracket of 8 with 3 byes.
    assert!(t.zones.is_empty());
    let round_one = t.round_matches(KnockoutRound::Quarterfinals);
    assert_eq!(round_one.len(), 4);
    let byes = round_one.iter().filter(|m| m.is_completed()).count();
    assert_eq!(byes, 3);

    sweep_pending(&mut t, |m| matches!(m.round, Round::Knockout(_)));
    assert_eq!(t.status, TournamentStatus::Finished);
    // Seed 1 had a bye and side A won everything after it.
    assert_eq!(t.champion, Some(couples[0]));
}
