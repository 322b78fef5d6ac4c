//! Player and Category data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in couples and registrations).
pub type PlayerId = Uuid;

/// A playing category and its entry score. Players are assigned the
/// category's minimum score on their first tournament entry and climb
/// from there.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub min_score: u32,
}

impl Category {
    pub fn new(name: impl Into<String>, min_score: u32) -> Self {
        Self {
            name: name.into(),
            min_score,
        }
    }
}

/// A player known to the club.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Category assigned on first tournament entry; None until then.
    pub category: Option<String>,
    /// Ranking score within the category.
    pub score: u32,
    /// Set exactly once, when the player enters their first tournament.
    pub categorized: bool,
}

impl Player {
    /// Create a new, uncategorized player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            score: 0,
            categorized: false,
        }
    }

    /// Assign a category and its minimum score. No-op once `categorized`
    /// is set, so first-entry assignment stays idempotent.
    pub fn categorize(&mut self, category: &Category) {
        if self.categorized {
            return;
        }
        self.category = Some(category.name.clone());
        self.score = category.min_score;
        self.categorized = true;
    }
}
