use super::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A player's aggregated output for one gameweek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub points: i32,
    pub did_play: bool,
}

impl StatLine {
    pub fn played(points: i32) -> Self {
        Self { points, did_play: true }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

/// One scored action recorded against a player in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub match_id: u64,
    pub player_id: PlayerId,
    pub action: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub points_awarded: i32,
}

fn default_quantity() -> u32 {
    1
}

impl MatchEvent {
    /// Points for the whole quantity, saturating at the `i32` bounds.
    pub fn points(&self) -> i32 {
        let quantity = i32::try_from(self.quantity).unwrap_or(i32::MAX);
        self.points_awarded.saturating_mul(quantity)
    }
}

/// Raw inputs for one gameweek: match events plus explicit appearances
/// recorded without any scored action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameweekStats {
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub appearances: BTreeSet<PlayerId>,
}

impl GameweekStats {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.appearances.is_empty()
    }
}
