//! Start a tournament: freeze registrations and open play.

use crate::logic::bracket::seed_bracket_direct;
use crate::logic::zones::build_zones;
use crate::models::{Tournament, TournamentError, TournamentStatus};

/// Move a tournament out of registration and into play.
///
/// The status change from `NotStarted` acts as the one-shot guard: a
/// second call (or a concurrent one under the store's write lock) fails
/// with `TournamentAlreadyStarted`, so zones can never be built twice.
/// With enough couples the zone stage is built; below
/// `min_couples_for_zones` the zone stage is skipped and the couples seed
/// the bracket directly, in registration order.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::NotStarted {
        return Err(TournamentError::TournamentAlreadyStarted);
    }
    let unpaired = tournament.individual_entrants().len();
    if unpaired > 0 {
        return Err(TournamentError::UnpairedPlayers(unpaired));
    }
    let couples = tournament.registered_couples().len();
    if couples < 2 {
        return Err(TournamentError::NotEnoughCouples {
            required: 2,
            found: couples,
        });
    }

    tournament.status = TournamentStatus::Pairing;
    if couples >= tournament.config.min_couples_for_zones {
        build_zones(tournament)?;
    } else {
        seed_bracket_direct(tournament)?;
    }
    tournament.status = TournamentStatus::InProgress;
    Ok(())
}
