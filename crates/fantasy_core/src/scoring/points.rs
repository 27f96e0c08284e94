//! Points per recorded action, by position.

use crate::models::{MatchEvent, PlayerId, Position};
use serde::{Deserialize, Serialize};

/// Points for one action. `position: None` applies to every position and is
/// used when no position-specific rule exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRule {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub points: i32,
}

impl PointsRule {
    pub fn all(action: &str, points: i32) -> Self {
        Self { action: action.to_string(), position: None, points }
    }

    pub fn for_position(action: &str, position: Position, points: i32) -> Self {
        Self { action: action.to_string(), position: Some(position), points }
    }
}

/// An action and how many times it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCount {
    pub action: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsLine {
    pub action: String,
    pub quantity: u32,
    pub points_per_unit: i32,
    pub subtotal: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable {
    rules: Vec<PointsRule>,
}

impl Default for PointsTable {
    fn default() -> Self {
        use Position::*;

        Self::new(vec![
            PointsRule::all("appearance", 2),
            PointsRule::for_position("goal", Goalkeeper, 10),
            PointsRule::for_position("goal", Defender, 6),
            PointsRule::for_position("goal", Midfielder, 5),
            PointsRule::for_position("goal", Forward, 4),
            PointsRule::all("assist", 3),
            PointsRule::for_position("clean_sheet", Goalkeeper, 4),
            PointsRule::for_position("clean_sheet", Defender, 4),
            PointsRule::for_position("clean_sheet", Midfielder, 1),
            PointsRule::all("clean_sheet", 0),
            PointsRule::all("own_goal", -2),
            PointsRule::all("pen_miss", -2),
            PointsRule::all("pen_save", 5),
            PointsRule::all("save_3", 1),
            PointsRule::all("yellow", -1),
            PointsRule::all("red", -3),
        ])
    }
}

impl PointsTable {
    pub fn new(rules: Vec<PointsRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PointsRule] {
        &self.rules
    }

    /// Position-specific rule first, then the all-positions rule. Unknown
    /// actions are worth nothing.
    pub fn points_for(&self, action: &str, position: Position) -> i32 {
        let specific = self
            .rules
            .iter()
            .find(|rule| rule.action == action && rule.position == Some(position));
        let fallback = || self.rules.iter().find(|rule| rule.action == action && rule.position.is_none());

        match specific.or_else(fallback) {
            Some(rule) => rule.points,
            None => {
                log::warn!("No points rule for action=\"{}\" position=\"{}\"", action, position.abbreviation());
                0
            }
        }
    }

    pub fn total_for(&self, actions: &[ActionCount], position: Position) -> (i32, Vec<PointsLine>) {
        let breakdown: Vec<PointsLine> = actions
            .iter()
            .map(|entry| {
                let points_per_unit = self.points_for(&entry.action, position);
                PointsLine {
                    action: entry.action.clone(),
                    quantity: entry.quantity,
                    points_per_unit,
                    subtotal: points_per_unit
                        .saturating_mul(i32::try_from(entry.quantity).unwrap_or(i32::MAX)),
                }
            })
            .collect();

        let total = breakdown.iter().fold(0i32, |acc, line| acc.saturating_add(line.subtotal));
        (total, breakdown)
    }

    /// Scored events for one player's actions in a match.
    pub fn events_for(
        &self,
        match_id: u64,
        player_id: &PlayerId,
        position: Position,
        actions: &[ActionCount],
    ) -> Vec<MatchEvent> {
        actions
            .iter()
            .map(|entry| MatchEvent {
                match_id,
                player_id: player_id.clone(),
                action: entry.action.clone(),
                quantity: entry.quantity,
                points_awarded: self.points_for(&entry.action, position),
            })
            .collect()
    }
}
