use super::captaincy::{resolve_captain, Captaincy};
use super::substitution::{resolve_lineup, AutoSub};
use crate::config::RulesConfig;
use crate::models::{PlayerId, PlayerMeta, Roster, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A manager's gameweek result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_points: i32,
    pub auto_subs: Vec<AutoSub>,
    pub captain_activated: Captaincy,
    pub bench_boost_applied: bool,
}

/// Turns a roster and per-player stat lines into a gameweek total.
///
/// Pure: missing stats count as did-not-play with zero points, missing
/// metadata makes a starter unsubstitutable.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    rules: &'a RulesConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(rules: &'a RulesConfig) -> Self {
        Self { rules }
    }

    pub fn compute_score(
        &self,
        roster: &Roster,
        stats: &HashMap<PlayerId, StatLine>,
        meta: &HashMap<PlayerId, PlayerMeta>,
    ) -> ScoreBreakdown {
        let bench_boost = roster.chip.is_bench_boost();

        // 1) who counts
        let (counted, auto_subs): (HashSet<&str>, Vec<AutoSub>) = if bench_boost {
            (roster.player_ids().map(String::as_str).collect(), Vec::new())
        } else {
            let lineup = resolve_lineup(
                roster,
                stats,
                meta,
                &self.rules.formation,
                self.rules.starting_size,
            );
            (lineup.players, lineup.auto_subs)
        };

        // 2) armband
        let (captain_activated, armband) = resolve_captain(roster, &counted, stats);
        let multiplier = if roster.chip.is_triple_captain() {
            self.rules.triple_captain_multiplier
        } else {
            self.rules.captain_multiplier
        };

        // 3) total
        let total_points = counted
            .iter()
            .map(|id| {
                let points = stats.get(*id).map_or(0, |line| line.points);
                if armband == Some(*id) {
                    points.saturating_mul(multiplier)
                } else {
                    points
                }
            })
            .fold(0i32, i32::saturating_add);

        ScoreBreakdown { total_points, auto_subs, captain_activated, bench_boost_applied: bench_boost }
    }
}

/// Score with the standard league rules.
pub fn compute_score(
    roster: &Roster,
    stats: &HashMap<PlayerId, StatLine>,
    meta: &HashMap<PlayerId, PlayerMeta>,
) -> ScoreBreakdown {
    let rules = RulesConfig::default();
    ScoringEngine::new(&rules).compute_score(roster, stats, meta)
}
