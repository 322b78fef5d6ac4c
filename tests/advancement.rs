//! Integration tests for round advancement: idempotency, winner
//! resolution, and tournament completion.

use padel_tournament_web::{
    advance_if_ready, record_result, register_couple, start_tournament, Category, CoupleId,
    KnockoutRound, Match, MatchScore, MatchStatus, Player, Roster, SetScore, Side, TeamSide,
    Tournament, TournamentError, TournamentStatus,
};

fn direct_bracket_club(n: usize) -> (Roster, Tournament, Vec<CoupleId>) {
    let mut roster = Roster::new();
    let mut t = Tournament::new("Open", Category::new("7ma", 100), 256);
    t.config.min_couples_for_zones = usize::MAX;
    let mut couples = Vec::new();
    for i in 0..n {
        let a = roster.add_player(Player::new(format!("S{i}a")));
        let b = roster.add_player(Player::new(format!("S{i}b")));
        register_couple(&mut roster, &mut t, a, b).unwrap();
        couples.push(roster.find_couple(a, b).unwrap());
    }
    (roster, t, couples)
}

fn side_a_wins() -> MatchScore {
    MatchScore::new(vec![SetScore::new(6, 2), SetScore::new(6, 3)])
}

/// Record every pending match of the given round with a side-A win.
fn sweep_round(t: &mut Tournament, round: KnockoutRound) {
    let pending: Vec<_> = t
        .round_matches(round)
        .iter()
        .filter(|m| m.status == MatchStatus::Pending)
        .map(|m| m.id)
        .collect();
    for id in pending {
        record_result(t, id, side_a_wins()).unwrap();
    }
}

#[test]
fn advancing_repeatedly_never_duplicates_a_round() {
    let (_, mut t, _) = direct_bracket_club(5);
    start_tournament(&mut t).unwrap();
    sweep_round(&mut t, KnockoutRound::Quarterfinals);

    let count = t.round_matches(KnockoutRound::Semifinal).len();
    assert_eq!(count, 2);
    let total = t.matches.len();

    for _ in 0..5 {
        advance_if_ready(&mut t).unwrap();
    }
    assert_eq!(t.round_matches(KnockoutRound::Semifinal).len(), count);
    assert_eq!(t.matches.len(), total);
}

#[test]
fn next_round_has_half_the_matches() {
    let (_, mut t, _) = direct_bracket_club(8);
    start_tournament(&mut t).unwrap();
    assert_eq!(t.round_matches(KnockoutRound::Quarterfinals).len(), 4);

    sweep_round(&mut t, KnockoutRound::Quarterfinals);
    assert_eq!(t.round_matches(KnockoutRound::Semifinal).len(), 2);

    sweep_round(&mut t, KnockoutRound::Semifinal);
    assert_eq!(t.round_matches(KnockoutRound::Final).len(), 1);
}

#[test]
fn final_completion_finishes_the_tournament_with_a_champion() {
    let (_, mut t, couples) = direct_bracket_club(4);
    start_tournament(&mut t).unwrap();
    assert_eq!(t.current_round, Some(KnockoutRound::Semifinal));

    sweep_round(&mut t, KnockoutRound::Semifinal);
    sweep_round(&mut t, KnockoutRound::Final);

    assert_eq!(t.status, TournamentStatus::Finished);
    assert_eq!(t.current_round, Some(KnockoutRound::Final));
    // Side A won every match, so seed 1 takes the title.
    assert_eq!(t.champion, Some(couples[0]));

    // A finished tournament is inert: advancing again changes nothing.
    let total = t.matches.len();
    advance_if_ready(&mut t).unwrap();
    assert_eq!(t.matches.len(), total);
    assert_eq!(t.status, TournamentStatus::Finished);
}

#[test]
fn waiting_slot_resolves_when_the_second_feeder_completes() {
    let (_, mut t, couples) = direct_bracket_club(8);
    start_tournament(&mut t).unwrap();

    // Complete only the first quarterfinal; the semifinal does not exist
    // yet because the round is not done.
    let first = t.round_matches(KnockoutRound::Quarterfinals)[0].id;
    record_result(&mut t, first, side_a_wins()).unwrap();
    assert!(t.round_matches(KnockoutRound::Semifinal).is_empty());

    sweep_round(&mut t, KnockoutRound::Quarterfinals);
    let semis = t.round_matches(KnockoutRound::Semifinal);
    assert_eq!(semis.len(), 2);
    // Every feeder was complete at creation, so both sides are couples.
    for m in &semis {
        assert!(m.side_a.couple().is_some());
        assert!(m.side_b.couple().is_some());
    }
    // Seed 1 won its quarterfinal from side A and moves on.
    assert!(semis[0].involves(couples[0]));
}

#[test]
fn recording_a_match_twice_is_rejected() {
    let (_, mut t, _) = direct_bracket_club(4);
    start_tournament(&mut t).unwrap();

    let id = t.round_matches(KnockoutRound::Semifinal)[0].id;
    record_result(&mut t, id, side_a_wins()).unwrap();
    assert_eq!(
        record_result(&mut t, id, side_a_wins()),
        Err(TournamentError::MatchAlreadyCompleted)
    );
}

#[test]
fn winner_side_follows_the_recorded_score() {
    let (_, mut t, _) = direct_bracket_club(6);
    start_tournament(&mut t).unwrap();

    // 8-slot bracket with 2 byes: quarterfinals hold two real matches.
    sweep_round(&mut t, KnockoutRound::Quarterfinals);
    let semis = t.round_matches(KnockoutRound::Semifinal);
    assert_eq!(semis.len(), 2);

    let id = semis[0].id;
    let winner = record_result(
        &mut t,
        id,
        MatchScore::new(vec![SetScore::new(3, 6), SetScore::new(2, 6)]),
    )
    .unwrap();
    assert_eq!(winner, TeamSide::B);
    assert_eq!(t.find_match(id).unwrap().winner, Some(TeamSide::B));
}

#[test]
fn unresolved_matches_cannot_take_results() {
    let (_, mut t, couples) = direct_bracket_club(2);
    start_tournament(&mut t).unwrap();

    // Hand-build a match still waiting on a feeder's winner.
    let feeder = t.round_matches(KnockoutRound::Final)[0].id;
    let waiting = Match::knockout(
        KnockoutRound::Final,
        Side::Couple(couples[0]),
        Side::AwaitingWinner(feeder),
        9,
    );
    let waiting_id = waiting.id;
    t.matches.push(waiting);

    assert_eq!(
        record_result(&mut t, waiting_id, side_a_wins()),
        Err(TournamentError::MatchNotReady)
    );
}
