//! Tournament business logic: registration, zones, standings, bracket,
//! advancement, results.

mod advancement;
mod bracket;
mod registration;
mod results;
mod setup;
mod standings;
mod zones;

pub use advancement::advance_if_ready;
pub use registration::{pair_individuals, register_couple, register_individual, unregister};
pub use results::{record_result, winner_of};
pub use setup::start_tournament;
pub use standings::{zone_standings, StandingRow};
pub use zones::build_zones;
