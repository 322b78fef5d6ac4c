//! Standings calculator: ranked table for one zone, derived from its
//! completed matches.

use crate::models::{CoupleId, Round, TeamSide, Tournament, TournamentError, ZoneId};
use serde::{Deserialize, Serialize};

/// One row of a zone table. Derived on demand, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub couple: CoupleId,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    /// Games won minus games conceded, across all completed matches.
    pub games_diff: i32,
    pub points: u32,
}

/// Compute the ranked standings of a zone from its completed matches.
///
/// Ordering: points, then head-to-head when exactly two couples are tied
/// on points, then games difference, then zone member order. The member
/// order fallback makes the result a total order, so re-running over the
/// same matches always yields the same table.
pub fn zone_standings(
    tournament: &Tournament,
    zone_id: ZoneId,
) -> Result<Vec<StandingRow>, TournamentError> {
    let zone = tournament
        .zone(zone_id)
        .ok_or(TournamentError::ZoneNotFound(zone_id))?;

    let mut rows: Vec<StandingRow> = zone
        .members
        .iter()
        .map(|&couple| StandingRow {
            couple,
            played: 0,
            won: 0,
            lost: 0,
            games_diff: 0,
            points: 0,
        })
        .collect();

    let points_per_win = tournament.config.points_per_win;
    for m in tournament.zone_matches(zone_id) {
        if !m.is_completed() {
            continue;
        }
        let (Some(couple_a), Some(couple_b), Some(winner)) =
            (m.side_a.couple(), m.side_b.couple(), m.winner)
        else {
            continue;
        };
        let (games_a, games_b) = m
            .result
            .as_ref()
            .map(|score| score.games_won())
            .unwrap_or((0, 0));
        let diff = games_a as i32 - games_b as i32;

        for row in rows.iter_mut() {
            if row.couple == couple_a {
                row.played += 1;
                row.games_diff += diff;
                if winner == TeamSide::A {
                    row.won += 1;
                    row.points += points_per_win;
                } else {
                    row.lost += 1;
                }
            } else if row.couple == couple_b {
                row.played += 1;
                row.games_diff -= diff;
                if winner == TeamSide::B {
                    row.won += 1;
                    row.points += points_per_win;
                } else {
                    row.lost += 1;
                }
            }
        }
    }

    // Base order: points, games difference, member order.
    rows.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then(y.games_diff.cmp(&x.games_diff))
            .then(zone.member_index(x.couple).cmp(&zone.member_index(y.couple)))
    });

    // Direct confrontation overrides the rest when exactly two couples
    // share the same points.
    apply_head_to_head(tournament, zone_id, &mut rows);

    Ok(rows)
}

/// For every points group of exactly two rows, put the head-to-head winner
/// first if the couples' zone match is completed.
fn apply_head_to_head(tournament: &Tournament, zone_id: ZoneId, rows: &mut [StandingRow]) {
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && rows[end].points == rows[start].points {
            end += 1;
        }
        if end - start == 2 {
            let (first, second) = (rows[start].couple, rows[start + 1].couple);
            if head_to_head_winner(tournament, zone_id, first, second) == Some(second) {
                rows.swap(start, start + 1);
            }
        }
        start = end;
    }
}

/// Winner of the completed zone match between two couples, if any.
fn head_to_head_winner(
    tournament: &Tournament,
    zone_id: ZoneId,
    couple_x: CoupleId,
    couple_y: CoupleId,
) -> Option<CoupleId> {
    tournament
        .matches
        .iter()
        .find(|m| {
            m.round == Round::Zone
                && m.zone_id == Some(zone_id)
                && m.is_completed()
                && m.involves(couple_x)
                && m.involves(couple_y)
        })
        .and_then(|m| m.winner_couple())
}
