//! Batch scoring of every roster saved for a gameweek.

use super::engine::{ScoreBreakdown, ScoringEngine};
use crate::config::RulesConfig;
use crate::error::Result;
use crate::models::{Gameweek, ManagerId, MatchEvent, PlayerId, StatLine};
use crate::store::FantasyStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Persisted total for one manager and gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub manager_id: ManagerId,
    pub gameweek: Gameweek,
    pub total_points: i32,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerScore {
    pub manager_id: ManagerId,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameweekScoring {
    pub gameweek: Gameweek,
    pub managers_scored: usize,
    pub results: Vec<ManagerScore>,
}

/// Fold match events into one stat line per player. Any event, or an
/// explicit appearance, marks the player as having played.
pub fn aggregate_events(
    events: &[MatchEvent],
    appearances: &BTreeSet<PlayerId>,
) -> HashMap<PlayerId, StatLine> {
    let mut lines: HashMap<PlayerId, StatLine> = HashMap::new();

    for event in events {
        let line = lines.entry(event.player_id.clone()).or_default();
        line.points = line.points.saturating_add(event.points());
        line.did_play = true;
    }

    for player_id in appearances {
        lines.entry(player_id.clone()).or_default().did_play = true;
    }

    lines
}

/// Score every manager with a roster for `gameweek` and upsert their totals.
pub fn score_gameweek(
    store: &dyn FantasyStore,
    rules: &RulesConfig,
    gameweek: Gameweek,
) -> Result<GameweekScoring> {
    let rosters = store.rosters_for_gameweek(gameweek)?;
    let raw = store.gameweek_stats(gameweek)?;
    let stats = aggregate_events(&raw.events, &raw.appearances);

    let mut ids: Vec<PlayerId> = rosters.iter().flat_map(|r| r.player_ids().cloned()).collect();
    ids.sort();
    ids.dedup();
    let meta = store.player_meta(&ids)?;

    let engine = ScoringEngine::new(rules);
    let computed_at = Utc::now();

    let mut results = Vec::with_capacity(rosters.len());
    let mut weekly = Vec::with_capacity(rosters.len());
    for roster in &rosters {
        let breakdown = engine.compute_score(roster, &stats, &meta);
        weekly.push(WeeklyScore {
            manager_id: roster.manager_id.clone(),
            gameweek,
            total_points: breakdown.total_points,
            computed_at,
        });
        results.push(ManagerScore { manager_id: roster.manager_id.clone(), breakdown });
    }

    store.upsert_weekly_scores(weekly)?;

    log::info!(
        "Scored gameweek {}: {} managers, {} players with stats",
        gameweek,
        results.len(),
        stats.len()
    );
    Ok(GameweekScoring { gameweek, managers_scored: results.len(), results })
}
