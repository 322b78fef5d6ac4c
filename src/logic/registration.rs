//! Registration ledger: individual and couple registrations, with atomic
//! individual-to-couple conversion.
//!
//! Every operation validates all of its preconditions before touching the
//! tournament, so a failed call changes nothing and the row count for a
//! pair of players never passes through 0 or 3.

use crate::models::{
    Entrant, Inscription, PlayerId, Roster, Tournament, TournamentError, TournamentStatus,
};

/// Register a single player looking for a partner.
///
/// On a player's first-ever tournament entry they are assigned the
/// tournament category and its minimum score.
pub fn register_individual(
    roster: &mut Roster,
    tournament: &mut Tournament,
    player_id: PlayerId,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::NotStarted {
        return Err(TournamentError::TournamentAlreadyStarted);
    }
    if roster.player(player_id).is_none() {
        return Err(TournamentError::PlayerNotFound(player_id));
    }
    if inscription_of(roster, tournament, player_id).is_some() {
        return Err(TournamentError::AlreadyRegistered(player_id));
    }
    if tournament.players_registered() + 1 > tournament.max_players {
        return Err(TournamentError::CapacityExceeded {
            max_players: tournament.max_players,
        });
    }

    tournament
        .inscriptions
        .push(Inscription::individual(player_id));
    categorize_on_entry(roster, tournament, player_id);
    Ok(())
}

/// Register two players as a couple.
///
/// If exactly one of them already holds an individual registration, that
/// registration is converted: the individual row is removed and the couple
/// row added in the same step. Any other existing registration (a couple
/// row for either player, or individual rows for both) is a conflict —
/// two individuals are paired with [`pair_individuals`] instead.
pub fn register_couple(
    roster: &mut Roster,
    tournament: &mut Tournament,
    player_a: PlayerId,
    player_b: PlayerId,
) -> Result<(), TournamentError> {
    if player_a == player_b {
        return Err(TournamentError::SamePlayer);
    }
    if tournament.status != TournamentStatus::NotStarted {
        return Err(TournamentError::TournamentAlreadyStarted);
    }
    for pid in [player_a, player_b] {
        if roster.player(pid).is_none() {
            return Err(TournamentError::PlayerNotFound(pid));
        }
    }

    let existing_a = inscription_of(roster, tournament, player_a);
    let existing_b = inscription_of(roster, tournament, player_b);
    let converted = match (existing_a, existing_b) {
        (None, None) => None,
        (Some(idx), None) | (None, Some(idx)) => {
            match tournament.inscriptions[idx].entrant {
                Entrant::Individual(_) => Some(idx),
                Entrant::Couple(_) => {
                    let pid = if existing_a.is_some() { player_a } else { player_b };
                    return Err(TournamentError::AlreadyRegistered(pid));
                }
            }
        }
        // Both already registered: two individuals go through
        // pair_individuals, anything else is plainly a conflict.
        (Some(_), Some(_)) => return Err(TournamentError::AlreadyRegistered(player_a)),
    };

    let slots_taken = if converted.is_some() { 1 } else { 2 };
    if tournament.players_registered() + slots_taken > tournament.max_players {
        return Err(TournamentError::CapacityExceeded {
            max_players: tournament.max_players,
        });
    }

    let couple_id = roster.find_or_create_couple(player_a, player_b);
    if let Some(idx) = converted {
        tournament.inscriptions.remove(idx);
    }
    tournament
        .inscriptions
        .push(Inscription::couple(couple_id));
    categorize_on_entry(roster, tournament, player_a);
    categorize_on_entry(roster, tournament, player_b);
    Ok(())
}

/// Club-only: merge two existing individual registrations into one couple
/// registration. Both individual rows are removed and the couple row added
/// in a single step.
pub fn pair_individuals(
    roster: &mut Roster,
    tournament: &mut Tournament,
    player_a: PlayerId,
    player_b: PlayerId,
) -> Result<(), TournamentError> {
    if player_a == player_b {
        return Err(TournamentError::SamePlayer);
    }
    if tournament.status != TournamentStatus::NotStarted {
        return Err(TournamentError::TournamentAlreadyStarted);
    }

    let mut indices = [0usize; 2];
    for (slot, pid) in [player_a, player_b].into_iter().enumerate() {
        let idx = inscription_of(roster, tournament, pid)
            .ok_or(TournamentError::NotRegistered(pid))?;
        match tournament.inscriptions[idx].entrant {
            Entrant::Individual(_) => indices[slot] = idx,
            Entrant::Couple(_) => return Err(TournamentError::AlreadyRegistered(pid)),
        }
    }

    let couple_id = roster.find_or_create_couple(player_a, player_b);
    // Remove the higher index first so the lower one stays valid.
    indices.sort_unstable();
    tournament.inscriptions.remove(indices[1]);
    tournament.inscriptions.remove(indices[0]);
    tournament
        .inscriptions
        .push(Inscription::couple(couple_id));
    Ok(())
}

/// Remove a player's registration (individual, or the whole couple row if
/// they registered as part of a couple).
pub fn unregister(
    roster: &Roster,
    tournament: &mut Tournament,
    player_id: PlayerId,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::NotStarted {
        return Err(TournamentError::TournamentAlreadyStarted);
    }
    let idx = inscription_of(roster, tournament, player_id)
        .ok_or(TournamentError::NotRegistered(player_id))?;
    tournament.inscriptions.remove(idx);
    Ok(())
}

/// Index of the inscription involving a player, individual or couple.
fn inscription_of(roster: &Roster, tournament: &Tournament, player_id: PlayerId) -> Option<usize> {
    tournament.inscriptions.iter().position(|i| match i.entrant {
        Entrant::Individual(pid) => pid == player_id,
        Entrant::Couple(cid) => roster
            .couple(cid)
            .is_some_and(|c| c.contains(player_id)),
    })
}

/// First-entry categorization: assign the tournament's category and its
/// minimum score. The player's `categorized` flag keeps this idempotent.
fn categorize_on_entry(roster: &mut Roster, tournament: &Tournament, player_id: PlayerId) {
    if let Some(player) = roster.player_mut(player_id) {
        player.categorize(&tournament.category);
    }
}
