//! Automatic substitution of starters who did not play.

use crate::models::{PlayerId, PlayerMeta, Roster, StatLine};
use crate::rules::{FormationLimits, PositionCounts};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One bench player brought on for an absent starter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSub {
    pub out_id: PlayerId,
    pub in_id: PlayerId,
    pub reason: String,
}

/// Players whose points count, after substitution.
#[derive(Debug, Clone, Default)]
pub(crate) struct EffectiveLineup<'r> {
    pub players: HashSet<&'r str>,
    pub auto_subs: Vec<AutoSub>,
}

fn did_play(stats: &HashMap<PlayerId, StatLine>, id: &str) -> bool {
    stats.get(id).map_or(false, |line| line.did_play)
}

/// Same goalkeeper-ness and same lady-ness.
fn like_for_like(out: &PlayerMeta, candidate: &PlayerMeta) -> bool {
    out.position.is_goalkeeper() == candidate.position.is_goalkeeper()
        && out.is_lady == candidate.is_lady
}

/// Starters who played, plus at most one bench replacement per absent
/// starter.
///
/// Absent starters are handled in roster order. For each one the bench is
/// scanned in priority order and the first candidate that played, has
/// metadata, matches like for like and keeps the lineup inside the
/// formation wins. Below `starting_size` only the position maximums are
/// enforced; once the lineup is full every range must hold.
pub(crate) fn resolve_lineup<'r>(
    roster: &'r Roster,
    stats: &HashMap<PlayerId, StatLine>,
    meta: &HashMap<PlayerId, PlayerMeta>,
    formation: &FormationLimits,
    starting_size: usize,
) -> EffectiveLineup<'r> {
    let mut lineup = EffectiveLineup::default();

    // 1) starters who played
    for slot in roster.starters() {
        if did_play(stats, &slot.player_id) {
            lineup.players.insert(slot.player_id.as_str());
        }
    }

    let mut counts = PositionCounts::from_positions(
        lineup.players.iter().filter_map(|id| meta.get(*id)).map(|m| m.position),
    );

    // 2) replacements in bench priority
    let bench = roster.bench_in_order();
    let mut used: HashSet<&str> = HashSet::new();

    for slot in roster.starters() {
        if lineup.players.contains(slot.player_id.as_str()) {
            continue;
        }
        let Some(out_meta) = meta.get(&slot.player_id) else {
            continue;
        };

        let replacement = bench.iter().copied().find_map(|candidate| {
            let id = candidate.player_id.as_str();
            if used.contains(id) || !did_play(stats, id) {
                return None;
            }
            let in_meta = meta.get(id)?;
            if !like_for_like(out_meta, in_meta) {
                return None;
            }

            let trial = counts.with(in_meta.position);
            let fits = if trial.total() >= starting_size {
                formation.is_complete(&trial)
            } else {
                formation.within_maximums(&trial)
            };
            fits.then_some((id, in_meta, trial))
        });

        match replacement {
            Some((in_id, in_meta, trial)) => {
                used.insert(in_id);
                lineup.players.insert(in_id);
                counts = trial;

                log::debug!(
                    "auto-sub for {} gw{}: {} -> {}",
                    roster.manager_id,
                    roster.gameweek,
                    slot.player_id,
                    in_id
                );
                lineup.auto_subs.push(AutoSub {
                    out_id: slot.player_id.clone(),
                    in_id: in_id.to_string(),
                    reason: format!(
                        "{} didn't play, subbed {} from bench",
                        out_meta.position.abbreviation(),
                        in_meta.position.abbreviation()
                    ),
                });
            }
            None => {
                log::debug!(
                    "no eligible bench player for {} ({} gw{})",
                    slot.player_id,
                    roster.manager_id,
                    roster.gameweek
                );
            }
        }
    }

    lineup
}
