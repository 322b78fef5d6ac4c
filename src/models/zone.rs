//! Zone: a round-robin group of couples.

use crate::models::couple::CoupleId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a zone.
pub type ZoneId = Uuid;

/// A round-robin group. Membership is fixed at creation; member order is
/// the deterministic last tie-break for standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub members: Vec<CoupleId>,
}

impl Zone {
    pub fn new(name: impl Into<String>, members: Vec<CoupleId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
        }
    }

    /// Position of a couple in the zone, used as the standings fallback order.
    pub fn member_index(&self, couple_id: CoupleId) -> Option<usize> {
        self.members.iter().position(|&c| c == couple_id)
    }
}
